//! Wire lanes through the cable region.
//!
//! Every net runs straight from the inner face of end A to the inner face of
//! end B. Ribbon cables place conductors at the ribbon pitch, centered on the
//! cable; round cables spread their conductors evenly over the region height.

use log::debug;
use serde::Serialize;

use cabledraw_core::{
    design::Cable,
    geometry::{Point, round2},
};

use super::Pass;
use crate::{context::RenderContext, error::RenderError};

const MM_PER_INCH: f64 = 25.4;

/// The drawn path of one net.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetPath {
    pub circuit: String,
    pub lane: usize,
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Extent of a ribbon cable's conductor band.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonLayout {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub lanes: u32,
    pub pitch: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingResult {
    pub paths: Vec<NetPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ribbon_layout: Option<RibbonLayout>,
}

/// Assigns every net a lane and a straight path.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingPass;

impl Pass for RoutingPass {
    type Output<'a> = RoutingResult;

    fn name(&self) -> &'static str {
        "routing"
    }

    fn run<'a>(&self, ctx: &RenderContext<'a>) -> Result<RoutingResult, RenderError> {
        let topology = ctx.topology(self.name())?;
        let design = ctx.design();
        let cable = topology.cable_region;

        let from_x = round2(topology.end_a.right());
        let to_x = round2(topology.end_b.x());
        let path = |circuit: &str, lane: usize, y: f64, color: Option<&String>| NetPath {
            circuit: circuit.to_string(),
            lane,
            points: vec![Point::new(from_x, y).rounded(), Point::new(to_x, y).rounded()],
            color: color.cloned(),
        };

        let result = match design.cable() {
            None => RoutingResult::default(),
            Some(&Cable::Ribbon { ways, pitch_in, .. }) => {
                if ways == 0 {
                    return Err(RenderError::InvalidCable(
                        "ribbon cable must have at least one way".to_string(),
                    ));
                }
                if !(pitch_in > 0.0 && pitch_in.is_finite()) {
                    return Err(RenderError::InvalidCable(format!(
                        "ribbon pitch must be positive, got {pitch_in}"
                    )));
                }

                let pitch = pitch_in * MM_PER_INCH;
                let ribbon_width = f64::from(ways - 1) * pitch;
                let start_y = cable.y() + cable.height() / 2.0 - ribbon_width / 2.0;

                let paths = design
                    .nets()
                    .iter()
                    .enumerate()
                    .map(|(index, net)| {
                        let lane = index % ways as usize;
                        let y = start_y + lane as f64 * pitch;
                        path(&net.circuit, lane, y, net.color.as_ref())
                    })
                    .collect();

                RoutingResult {
                    paths,
                    ribbon_layout: Some(RibbonLayout {
                        start_x: from_x,
                        start_y: round2(start_y),
                        end_x: to_x,
                        end_y: round2(start_y),
                        lanes: ways,
                        pitch: round2(pitch),
                    }),
                }
            }
            Some(Cable::Round { .. }) => {
                let nets = design.nets();
                let spacing = cable.height() / (nets.len() + 1) as f64;

                let paths = nets
                    .iter()
                    .enumerate()
                    .map(|(index, net)| {
                        let y = cable.y() + spacing * (index + 1) as f64;
                        path(&net.circuit, index, y, net.color.as_ref())
                    })
                    .collect();

                RoutingResult {
                    paths,
                    ribbon_layout: None,
                }
            }
        };

        debug!(paths = result.paths.len(); "Nets routed");
        Ok(result)
    }
}
