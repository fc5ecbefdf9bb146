//! Cabledraw - A layout engine for cable assembly drawings.
//!
//! Turns a declarative cable design (overall length, tolerance, labels, and
//! optionally the cable construction and its wire nets) plus a target
//! viewport into concrete geometry: connector rectangles, the cable region,
//! the overall-length dimension line, wire paths and non-overlapping label
//! positions. Rendering the geometry to SVG or PDF is left to the caller.

pub mod config;
pub mod passes;
pub mod template;

mod context;
mod error;
mod pipeline;

pub use cabledraw_core::{design, geometry, viewport};

pub use context::RenderContext;
pub use error::{CabledrawError, RenderError, RenderWarning};
pub use pipeline::{Pipeline, RenderResult};

use log::{debug, info, trace};

use config::AppConfig;
use design::CableDesign;
use viewport::Viewport;

/// Renders `design` into `viewport` with the default configuration.
///
/// # Errors
///
/// Returns the first `RenderError` raised while laying out the drawing.
///
/// # Examples
///
/// ```
/// use cabledraw::{design::{CableDesign, Dimensions}, viewport::Viewport};
///
/// let design = CableDesign::new(Dimensions::new(150.0, 2.0));
/// let result = cabledraw::render(&design, Viewport::new(0.0, 0.0, 400.0, 100.0)).unwrap();
/// assert_eq!(result.topology().end_a.x(), 40.0);
/// ```
pub fn render(design: &CableDesign, viewport: Viewport) -> Result<RenderResult<'_>, RenderError> {
    Pipeline::default().render(design, viewport)
}

/// Builder for parsing and rendering cable drawings.
///
/// # Examples
///
/// ```rust,no_run
/// use cabledraw::{DrawingBuilder, config::AppConfig};
///
/// let source = r#"{"dimensions": {"oal_mm": 150, "tolerance_mm": 2}}"#;
///
/// let builder = DrawingBuilder::new(AppConfig::default());
///
/// // Parse source to a cable design
/// let design = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Lay it out on the configured page
/// let json = builder.render_json(&design, builder.viewport())
///     .expect("Failed to render");
/// ```
#[derive(Debug, Default)]
pub struct DrawingBuilder {
    config: AppConfig,
}

impl DrawingBuilder {
    /// Create a new drawing builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including page and collision settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the content area of the configured page.
    pub fn viewport(&self) -> Viewport {
        self.config.page().viewport()
    }

    /// Parse a JSON cable design.
    ///
    /// Only the shape is checked here. Geometric validity (positive length,
    /// known anchors) is checked when rendering.
    ///
    /// # Errors
    ///
    /// Returns `CabledrawError::Parse`, carrying the source text, if the JSON
    /// is malformed or does not match the design shape.
    pub fn parse(&self, source: &str) -> Result<CableDesign, CabledrawError> {
        info!("Parsing cable design");

        let design: CableDesign = serde_json::from_str(source)
            .map_err(|err| CabledrawError::new_parse_error(err, source))?;

        debug!(
            labels = design.labels().len(),
            nets = design.nets().len();
            "Cable design parsed successfully"
        );
        trace!(design:?; "Parsed design");

        Ok(design)
    }

    /// Lay out a cable design in `viewport`.
    ///
    /// # Errors
    ///
    /// Returns `CabledrawError::Render` if any layout pass fails.
    pub fn render<'a>(
        &self,
        design: &'a CableDesign,
        viewport: Viewport,
    ) -> Result<RenderResult<'a>, CabledrawError> {
        let pipeline = Pipeline::new(self.config.collision().clone());
        Ok(pipeline.render(design, viewport)?)
    }

    /// Lay out a cable design and serialize the result as pretty JSON.
    ///
    /// The output is identical byte for byte across calls with the same input.
    ///
    /// # Errors
    ///
    /// Returns `CabledrawError::Render` if any layout pass fails, or
    /// `CabledrawError::Serialize` if the result cannot be written as JSON.
    pub fn render_json(
        &self,
        design: &CableDesign,
        viewport: Viewport,
    ) -> Result<String, CabledrawError> {
        let result = self.render(design, viewport)?;
        let json = serde_json::to_string_pretty(&result).map_err(CabledrawError::Serialize)?;

        info!(bytes = json.len(); "Render result serialized");
        Ok(json)
    }
}
