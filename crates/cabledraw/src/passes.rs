//! Layout passes.
//!
//! Each pass is a pure computation over a [`RenderContext`] producing one
//! fragment of the final [`RenderResult`](crate::RenderResult). Passes never
//! mutate the context; the [`Pipeline`](crate::Pipeline) decides what gets
//! attached to it and in which order passes run.
//!
//! - [`TopologyPass`] places the connectors and the cable region. No dependencies.
//! - [`DimensionPass`] derives the overall-length dimension line from the topology.
//! - [`CollisionPass`] positions labels and resolves their overlaps.
//! - [`RoutingPass`] assigns each wire net a lane through the cable region.

mod collision;
mod dimension;
mod routing;
mod topology;

pub use collision::{AdjustedLabel, CollisionPass, CollisionResult};
pub use dimension::{DimensionLine, DimensionPass, DimensionResult};
pub use routing::{NetPath, RibbonLayout, RoutingPass, RoutingResult};
pub use topology::{
    CABLE_HEIGHT, CONNECTOR_HEIGHT, CONNECTOR_WIDTH, EDGE_SPACING, TopologyPass, TopologyResult,
};

use crate::{context::RenderContext, error::RenderError};

/// A single stage of the layout pipeline.
pub trait Pass {
    /// The result fragment this pass produces.
    type Output<'a>;

    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Run the pass.
    ///
    /// # Errors
    ///
    /// Returns a `RenderError` if the context cannot be laid out. Passes that
    /// depend on topology return `RenderError::MissingTopology` when run on a
    /// context without it.
    fn run<'a>(&self, ctx: &RenderContext<'a>) -> Result<Self::Output<'a>, RenderError>;
}
