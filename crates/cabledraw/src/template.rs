//! Template pack manifests.
//!
//! A template pack describes a drawing sheet: paper, page size and margins.
//! The layout engine only needs the content area, which [`TemplatePack::viewport`]
//! derives. Styles, fonts and symbols in the manifest belong to the
//! serializer and are ignored here.

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;

use cabledraw_core::viewport::Viewport;

use crate::{
    config::{DEFAULT_PAGE_HEIGHT_MM, DEFAULT_PAGE_WIDTH_MM, Margins, PageConfig},
    error::CabledrawError,
};

/// Page dimensions as written in a manifest.
///
/// Older manifests use `width`/`height`; both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageDimensions {
    #[serde(default, alias = "width")]
    width_mm: Option<f64>,
    #[serde(default, alias = "height")]
    height_mm: Option<f64>,
}

/// A deserialized `manifest.json` of a template pack.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplatePack {
    #[serde(default)]
    id: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    paper: String,
    #[serde(default)]
    dimensions: PageDimensions,
    #[serde(default)]
    margins: Margins,
}

impl TemplatePack {
    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CabledrawError::Template` if the text is not a manifest or
    /// lacks an `id`, `version` or `paper`.
    pub fn from_json(json: &str) -> Result<Self, CabledrawError> {
        let pack: TemplatePack = serde_json::from_str(json)
            .map_err(|err| CabledrawError::Template(format!("invalid manifest: {err}")))?;

        if pack.id.is_empty() || pack.version.is_empty() || pack.paper.is_empty() {
            return Err(CabledrawError::Template(format!(
                "invalid manifest for template pack `{}`: id, version and paper are required",
                pack.id
            )));
        }

        Ok(pack)
    }

    /// Loads a manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns `CabledrawError::Io` if the file cannot be read, or
    /// `CabledrawError::Template` if its contents are not a valid manifest.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CabledrawError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Reading template manifest");

        let json = fs::read_to_string(path)?;
        let pack = Self::from_json(&json)?;

        info!(id = pack.id, version = pack.version; "Loaded template pack");
        Ok(pack)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn paper(&self) -> &str {
        &self.paper
    }

    /// Returns the sheet as a [`PageConfig`], defaulting to A3 where the
    /// manifest omits a dimension.
    pub fn page(&self) -> PageConfig {
        PageConfig::new(
            self.dimensions.width_mm.unwrap_or(DEFAULT_PAGE_WIDTH_MM),
            self.dimensions.height_mm.unwrap_or(DEFAULT_PAGE_HEIGHT_MM),
            self.margins,
        )
    }

    /// Returns the content area of the sheet.
    pub fn viewport(&self) -> Viewport {
        self.page().viewport()
    }
}
