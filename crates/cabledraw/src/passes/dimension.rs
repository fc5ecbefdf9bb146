//! Overall-length dimension line.
//!
//! The line runs beneath the cable across the full assembly envelope, from
//! the outer edge of end A to the outer edge of end B, as dimension lines on
//! cable drawings measure to the extremities of the mating connectors. The
//! annotated value is the design's own; only the line geometry is computed.

use serde::Serialize;

use cabledraw_core::geometry::round2;

use super::Pass;
use crate::{context::RenderContext, error::RenderError};

/// Gap between the bottom of the cable region and the dimension line
const DIMENSION_OFFSET: f64 = 15.0;

/// A horizontal dimension line and the value it annotates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub value_mm: f64,
    pub tolerance_mm: f64,
    pub broken: bool,
}

impl DimensionLine {
    /// Returns the drawn length of the line
    pub fn span(&self) -> f64 {
        self.x2 - self.x1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionResult {
    pub oal: DimensionLine,
}

/// Derives the OAL dimension line from the topology.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionPass;

impl Pass for DimensionPass {
    type Output<'a> = DimensionResult;

    fn name(&self) -> &'static str {
        "dimension"
    }

    fn run<'a>(&self, ctx: &RenderContext<'a>) -> Result<DimensionResult, RenderError> {
        let topology = ctx.topology(self.name())?;
        let dimensions = ctx.design().dimensions();

        let value_mm = dimensions.oal_mm();
        if !(value_mm > 0.0 && value_mm.is_finite()) {
            return Err(RenderError::InvalidDimension(format!(
                "overall length must be positive, got {value_mm}"
            )));
        }

        let tolerance_mm = dimensions.tolerance_mm();
        if !(tolerance_mm >= 0.0 && tolerance_mm.is_finite()) {
            return Err(RenderError::InvalidDimension(format!(
                "tolerance must not be negative, got {tolerance_mm}"
            )));
        }

        let y = round2(topology.cable_region.bottom() + DIMENSION_OFFSET);

        Ok(DimensionResult {
            oal: DimensionLine {
                x1: round2(topology.end_a.x()),
                y1: y,
                x2: round2(topology.end_b.right()),
                y2: y,
                value_mm,
                tolerance_mm,
                broken: dimensions.broken_dim(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use cabledraw_core::{
        design::{CableDesign, Dimensions},
        geometry::Rect,
        viewport::Viewport,
    };

    use super::*;
    use crate::passes::{TopologyPass, TopologyResult};

    fn run(dimensions: Dimensions, viewport: Viewport) -> Result<DimensionResult, RenderError> {
        let design = CableDesign::new(dimensions);
        let ctx = RenderContext::new(&design, viewport);
        let topology = TopologyPass.run(&ctx)?;
        DimensionPass.run(&ctx.with_topology(topology))
    }

    #[test]
    fn test_oal_line_in_400_by_100() {
        let result = run(
            Dimensions::new(150.0, 2.0),
            Viewport::new(0.0, 0.0, 400.0, 100.0),
        )
        .unwrap();

        assert_eq!(
            result.oal,
            DimensionLine {
                x1: 40.0,
                y1: 85.0,
                x2: 360.0,
                y2: 85.0,
                value_mm: 150.0,
                tolerance_mm: 2.0,
                broken: false,
            }
        );
    }

    #[test]
    fn test_span_covers_connector_envelope() {
        let design = CableDesign::new(Dimensions::new(10.0, 0.0));
        let topology = TopologyResult {
            end_a: Rect::new(12.5, 0.0, 20.0, 15.0),
            end_b: Rect::new(301.25, 0.0, 20.0, 15.0),
            cable_region: Rect::new(32.5, 0.0, 268.75, 40.0),
        };
        let ctx = RenderContext::new(&design, Viewport::new(0.0, 0.0, 1.0, 1.0))
            .with_topology(topology.clone());

        let oal = DimensionPass.run(&ctx).unwrap().oal;
        assert_eq!(
            oal.span(),
            topology.end_b.right() - topology.end_a.x()
        );
    }

    #[test]
    fn test_values_pass_through() {
        let result = run(
            Dimensions::new(1250.0, 5.0).with_broken_dim(true),
            Viewport::new(20.0, 20.0, 380.0, 247.0),
        )
        .unwrap();

        assert_eq!(result.oal.value_mm, 1250.0);
        assert_eq!(result.oal.tolerance_mm, 5.0);
        assert!(result.oal.broken);
        assert_eq!(result.oal.y1, result.oal.y2);
    }

    #[test]
    fn test_zero_tolerance_is_accepted() {
        let result = run(
            Dimensions::new(1.0, 0.0),
            Viewport::new(0.0, 0.0, 400.0, 100.0),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_non_positive_length_is_rejected() {
        for oal in [0.0, -5.0, f64::NAN] {
            let err = run(
                Dimensions::new(oal, 1.0),
                Viewport::new(0.0, 0.0, 400.0, 100.0),
            )
            .unwrap_err();
            assert!(matches!(err, RenderError::InvalidDimension(_)), "{oal}");
        }
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let err = run(
            Dimensions::new(150.0, -0.1),
            Viewport::new(0.0, 0.0, 400.0, 100.0),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimension(_)));
    }

    #[test]
    fn test_requires_topology() {
        let design = CableDesign::new(Dimensions::new(150.0, 2.0));
        let ctx = RenderContext::new(&design, Viewport::new(0.0, 0.0, 400.0, 100.0));

        assert_eq!(
            DimensionPass.run(&ctx).unwrap_err(),
            RenderError::MissingTopology { pass: "dimension" }
        );
    }
}
