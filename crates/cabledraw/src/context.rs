//! Per-render state threaded through the layout passes.

use cabledraw_core::{design::CableDesign, viewport::Viewport};

use crate::{error::RenderError, passes::TopologyResult};

/// The inputs of a single render plus the results later passes depend on.
///
/// A context is created fresh for every render and only ever grows by
/// consumption: [`RenderContext::with_topology`] takes the context by value and
/// returns a new one. Passes receive `&RenderContext` and have no way to
/// write to it, so nothing a pass sees can change underneath it and no pass
/// can observe results of a pass that has not run.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    design: &'a CableDesign,
    viewport: Viewport,
    topology: Option<TopologyResult>,
}

impl<'a> RenderContext<'a> {
    pub fn new(design: &'a CableDesign, viewport: Viewport) -> Self {
        Self {
            design,
            viewport,
            topology: None,
        }
    }

    /// Attaches the topology computed for this design and viewport.
    pub fn with_topology(self, topology: TopologyResult) -> Self {
        Self {
            topology: Some(topology),
            ..self
        }
    }

    pub fn design(&self) -> &'a CableDesign {
        self.design
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the topology, or `MissingTopology` naming the requesting pass.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::MissingTopology` if the topology pass has not run.
    pub fn topology(&self, pass: &'static str) -> Result<&TopologyResult, RenderError> {
        self.topology
            .as_ref()
            .ok_or(RenderError::MissingTopology { pass })
    }
}

#[cfg(test)]
mod tests {
    use cabledraw_core::{design::Dimensions, geometry::Rect};

    use super::*;

    #[test]
    fn test_new_context_has_no_topology() {
        let design = CableDesign::new(Dimensions::new(100.0, 1.0));
        let ctx = RenderContext::new(&design, Viewport::new(0.0, 0.0, 400.0, 100.0));

        assert_eq!(
            ctx.topology("collision").unwrap_err(),
            RenderError::MissingTopology { pass: "collision" }
        );
    }

    #[test]
    fn test_with_topology() {
        let design = CableDesign::new(Dimensions::new(100.0, 1.0));
        let topology = TopologyResult {
            end_a: Rect::new(40.0, 35.0, 20.0, 15.0),
            end_b: Rect::new(340.0, 35.0, 20.0, 15.0),
            cable_region: Rect::new(60.0, 30.0, 280.0, 40.0),
        };

        let ctx = RenderContext::new(&design, Viewport::new(0.0, 0.0, 400.0, 100.0))
            .with_topology(topology.clone());

        assert_eq!(ctx.topology("dimension"), Ok(&topology));
        assert!(std::ptr::eq(ctx.design(), &design));
    }
}
