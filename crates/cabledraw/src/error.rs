//! Error types for Cabledraw operations.
//!
//! [`RenderError`] covers everything the layout passes can reject. It is
//! always fatal: a render either produces a complete result or none at all.
//! Conditions the engine recovers from on its own are reported as
//! [`RenderWarning`]s on the result instead.
//!
//! [`CabledrawError`] is the library-level error wrapping I/O, input parsing,
//! template loading and rendering.

use std::io;

use serde::Serialize;
use thiserror::Error;

/// A fatal layout failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The viewport cannot fit the fixed connector and spacing constants.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A pass that needs topology ran on a context without it.
    #[error("{pass} pass requires topology, but the topology pass has not run")]
    MissingTopology { pass: &'static str },

    /// Non-positive overall length or negative tolerance.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A label names an anchor that is not one of the known kinds.
    #[error("label {index} has unknown anchor `{anchor}`")]
    InvalidAnchor { index: usize, anchor: String },

    /// The cable description cannot be routed.
    #[error("invalid cable: {0}")]
    InvalidCable(String),

    /// The design or viewport is structurally unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// A recoverable condition reported alongside a successful render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderWarning {
    /// Overlap resolution hit its iteration cap; the listed labels were
    /// stacked vertically instead.
    #[serde(rename_all = "camelCase")]
    CollisionFallback {
        labels: Vec<usize>,
        iterations: usize,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::CollisionFallback { labels, iterations } => write!(
                f,
                "label overlaps unresolved after {iterations} iterations, stacked labels {labels:?}"
            ),
        }
    }
}

/// The main error type for Cabledraw operations.
#[derive(Debug, Error)]
pub enum CabledrawError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The cable design could not be read. Keeps the source text so callers
    /// can point at the offending line.
    #[error("Invalid cable design: {err}")]
    Parse { err: serde_json::Error, src: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The render result could not be written out as JSON.
    #[error("Failed to serialize render result: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl CabledrawError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
