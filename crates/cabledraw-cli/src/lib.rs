//! CLI logic for the Cabledraw layout tool.
//!
//! Reads a JSON cable design, lays it out on the configured page and writes
//! the resulting geometry as JSON.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use cabledraw::{CabledrawError, DrawingBuilder, template::TemplatePack};

/// Run the Cabledraw CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CabledrawError` for:
/// - File I/O errors
/// - Configuration or template loading errors
/// - Malformed cable designs
/// - Layout errors
pub fn run(args: &Args) -> Result<(), CabledrawError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing cable design"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;

    if let Some(path) = &args.template {
        let template = TemplatePack::from_path(path)?;
        app_config = app_config.with_page(template.page());
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = DrawingBuilder::new(app_config);
    let design = builder.parse(&source)?;
    let json = builder.render_json(&design, builder.viewport())?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Geometry exported successfully");

    Ok(())
}
