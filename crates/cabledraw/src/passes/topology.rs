//! Connector and cable placement.
//!
//! The only topology supported is a single straight horizontal cable between
//! two end connectors:
//!
//! ```text
//!  |<-40->|<-20->|<------ cable length ------>|<-20->|<-40->|
//!         ┌──────┐                            ┌──────┐
//!         │ endA │════════ cableRegion ═══════│ endB │
//!         └──────┘                            └──────┘
//! ```
//!
//! Connector extents and spacing are drawing constants, not design inputs.

use log::debug;
use serde::Serialize;

use cabledraw_core::geometry::Rect;

use super::Pass;
use crate::{context::RenderContext, error::RenderError};

/// Width of a connector body
pub const CONNECTOR_WIDTH: f64 = 20.0;
/// Height of a connector body
pub const CONNECTOR_HEIGHT: f64 = 15.0;
/// Space between each connector and its edge of the content area
pub const EDGE_SPACING: f64 = 40.0;
/// Height of the cable region
pub const CABLE_HEIGHT: f64 = 40.0;

/// The cable region sits this far above the vertical center, leaving room
/// for the dimension line beneath it.
const CABLE_RAISE: f64 = 20.0;

/// Placement of the connectors and the cable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyResult {
    pub end_a: Rect,
    pub end_b: Rect,
    pub cable_region: Rect,
}

/// Places both connectors and the cable region inside the viewport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologyPass;

impl Pass for TopologyPass {
    type Output<'a> = TopologyResult;

    fn name(&self) -> &'static str {
        "topology"
    }

    fn run<'a>(&self, ctx: &RenderContext<'a>) -> Result<TopologyResult, RenderError> {
        let viewport = ctx.viewport();

        let cable_length =
            viewport.content_width() - 2.0 * EDGE_SPACING - 2.0 * CONNECTOR_WIDTH;
        if cable_length < 0.0 {
            return Err(RenderError::InvalidTopology(format!(
                "content width {} is narrower than the {} units needed for connectors and spacing",
                viewport.content_width(),
                2.0 * EDGE_SPACING + 2.0 * CONNECTOR_WIDTH
            )));
        }

        let center_y = viewport.center_y();
        let connector_y = center_y - CONNECTOR_HEIGHT;

        let end_a = Rect::new(
            viewport.content_x() + EDGE_SPACING,
            connector_y,
            CONNECTOR_WIDTH,
            CONNECTOR_HEIGHT,
        );
        let end_b = Rect::new(
            viewport.right() - EDGE_SPACING - CONNECTOR_WIDTH,
            connector_y,
            CONNECTOR_WIDTH,
            CONNECTOR_HEIGHT,
        );
        let cable_region = Rect::new(
            end_a.right(),
            center_y - CABLE_RAISE,
            cable_length,
            CABLE_HEIGHT,
        );

        debug!(cable_length; "Topology placed");

        Ok(TopologyResult {
            end_a: end_a.rounded(),
            end_b: end_b.rounded(),
            cable_region: cable_region.rounded(),
        })
    }
}

#[cfg(test)]
mod tests {
    use cabledraw_core::{
        design::{CableDesign, Dimensions},
        viewport::Viewport,
    };

    use super::*;

    fn run(viewport: Viewport) -> Result<TopologyResult, RenderError> {
        let design = CableDesign::new(Dimensions::new(150.0, 2.0));
        TopologyPass.run(&RenderContext::new(&design, viewport))
    }

    #[test]
    fn test_layout_in_400_by_100() {
        let topology = run(Viewport::new(0.0, 0.0, 400.0, 100.0)).unwrap();

        assert_eq!(topology.end_a, Rect::new(40.0, 35.0, 20.0, 15.0));
        assert_eq!(topology.end_b, Rect::new(340.0, 35.0, 20.0, 15.0));
        assert_eq!(topology.cable_region, Rect::new(60.0, 30.0, 280.0, 40.0));
    }

    #[test]
    fn test_layout_respects_content_origin() {
        let topology = run(Viewport::new(20.0, 20.0, 380.0, 247.0)).unwrap();

        assert_eq!(topology.end_a, Rect::new(60.0, 128.5, 20.0, 15.0));
        assert_eq!(topology.end_b, Rect::new(340.0, 128.5, 20.0, 15.0));
        assert_eq!(topology.cable_region, Rect::new(80.0, 123.5, 260.0, 40.0));
    }

    #[test]
    fn test_cable_spans_gap_between_connectors() {
        let topology = run(Viewport::new(3.0, 7.0, 512.25, 90.0)).unwrap();

        assert_eq!(topology.cable_region.x(), topology.end_a.right());
        assert_eq!(topology.cable_region.right(), topology.end_b.x());
    }

    #[test]
    fn test_exact_fit_gives_zero_length_cable() {
        let topology = run(Viewport::new(0.0, 0.0, 120.0, 100.0)).unwrap();
        assert_eq!(topology.cable_region.width(), 0.0);
        assert_eq!(topology.cable_region.x(), topology.end_b.x());
    }

    #[test]
    fn test_too_narrow_viewport_is_rejected() {
        let err = run(Viewport::new(0.0, 0.0, 50.0, 100.0)).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTopology(_)));
    }

    #[test]
    fn test_fractional_coordinates_are_rounded() {
        let topology = run(Viewport::new(0.0, 0.0, 400.0, 100.0 / 3.0)).unwrap();
        // center 16.666.. - 15
        assert_eq!(topology.end_a.y(), 1.67);
        assert_eq!(topology.cable_region.y(), -3.33);
    }
}
