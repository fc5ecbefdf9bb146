//! The render orchestrator.
//!
//! [`Pipeline::render`] builds a fresh [`RenderContext`], runs the topology
//! pass, attaches its result and then runs every pass that depends on it.
//! The first error aborts the render; there are no partial results.

use log::{debug, info, trace};
use serde::Serialize;

use cabledraw_core::{design::CableDesign, viewport::Viewport};

use crate::{
    config::CollisionConfig,
    context::RenderContext,
    error::{RenderError, RenderWarning},
    passes::{
        CollisionPass, CollisionResult, DimensionPass, DimensionResult, Pass, RoutingPass,
        RoutingResult, TopologyPass, TopologyResult,
    },
};

/// The merged output of every pass.
///
/// Serializes to a single flat JSON object: `endA`, `endB`, `cableRegion`,
/// `oal`, `adjustedLabels`, `paths`, the optional `ribbonLayout` and
/// `warnings`. Labels borrow from the design that was rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult<'a> {
    #[serde(flatten)]
    topology: TopologyResult,
    #[serde(flatten)]
    dimension: DimensionResult,
    #[serde(flatten)]
    collision: CollisionResult<'a>,
    #[serde(flatten)]
    routing: RoutingResult,
    warnings: Vec<RenderWarning>,
}

impl<'a> RenderResult<'a> {
    pub fn topology(&self) -> &TopologyResult {
        &self.topology
    }

    pub fn dimension(&self) -> &DimensionResult {
        &self.dimension
    }

    pub fn collision(&self) -> &CollisionResult<'a> {
        &self.collision
    }

    pub fn routing(&self) -> &RoutingResult {
        &self.routing
    }

    /// Non-fatal conditions raised while rendering
    pub fn warnings(&self) -> &[RenderWarning] {
        &self.warnings
    }
}

/// Runs the layout passes in dependency order.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    topology: TopologyPass,
    dimension: DimensionPass,
    collision: CollisionPass,
    routing: RoutingPass,
}

impl Pipeline {
    /// Creates a pipeline whose collision pass uses `collision`.
    pub fn new(collision: CollisionConfig) -> Self {
        Self {
            collision: CollisionPass::new(collision),
            ..Self::default()
        }
    }

    /// Lays out `design` inside `viewport`.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::InvalidInput` for a non-finite viewport or one
    /// with negative extents, and otherwise the first error raised by a pass.
    pub fn render<'a>(
        &self,
        design: &'a CableDesign,
        viewport: Viewport,
    ) -> Result<RenderResult<'a>, RenderError> {
        info!(
            labels = design.labels().len(),
            nets = design.nets().len();
            "Rendering cable drawing"
        );

        check_viewport(&viewport)?;

        let ctx = RenderContext::new(design, viewport);
        let topology = run_pass(&self.topology, &ctx)?;
        let ctx = ctx.with_topology(topology);

        let dimension = run_pass(&self.dimension, &ctx)?;
        let mut collision = run_pass(&self.collision, &ctx)?;
        let routing = run_pass(&self.routing, &ctx)?;

        let warnings = std::mem::take(&mut collision.warnings);
        let topology = ctx.topology(self.topology.name())?.clone();

        let result = RenderResult {
            topology,
            dimension,
            collision,
            routing,
            warnings,
        };

        info!(warnings = result.warnings.len(); "Render complete");
        trace!(result:?; "Render result");

        Ok(result)
    }
}

fn run_pass<'a, P: Pass>(pass: &P, ctx: &RenderContext<'a>) -> Result<P::Output<'a>, RenderError> {
    debug!(pass = pass.name(); "Running pass");
    pass.run(ctx)
}

fn check_viewport(viewport: &Viewport) -> Result<(), RenderError> {
    if !viewport.is_finite() {
        return Err(RenderError::InvalidInput(format!(
            "viewport must be finite, got {viewport:?}"
        )));
    }
    if viewport.content_width() < 0.0 || viewport.content_height() < 0.0 {
        return Err(RenderError::InvalidInput(format!(
            "viewport extents must not be negative, got {} x {}",
            viewport.content_width(),
            viewport.content_height()
        )));
    }
    Ok(())
}
