//! Configuration types for Cabledraw layout.
//!
//! This module provides configuration structures that control the sheet a
//! drawing is laid out on and how label collisions are resolved. All types
//! implement [`serde::Deserialize`] for loading from external sources, and
//! every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining page and collision settings.
//! - [`PageConfig`] - Sheet size and margins, from which the [`Viewport`] is derived.
//! - [`CollisionConfig`] - Default label footprint and the resolution iteration cap.
//!
//! # Example
//!
//! ```
//! # use cabledraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.collision().max_iterations(), 50);
//! assert_eq!(config.page().viewport().content_width(), 380.0);
//! ```

use serde::Deserialize;

use cabledraw_core::{geometry::Size, viewport::Viewport};

/// A3 landscape, the sheet used when nothing else is configured.
pub const DEFAULT_PAGE_WIDTH_MM: f64 = 420.0;
pub const DEFAULT_PAGE_HEIGHT_MM: f64 = 297.0;

/// Top-level configuration combining page and collision settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Page configuration section.
    #[serde(default)]
    page: PageConfig,

    /// Collision configuration section.
    #[serde(default)]
    collision: CollisionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `page` - Sheet size and margins.
    /// * `collision` - Label overlap resolution settings.
    pub fn new(page: PageConfig, collision: CollisionConfig) -> Self {
        Self { page, collision }
    }

    /// Returns the page configuration.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    /// Returns the collision configuration.
    pub fn collision(&self) -> &CollisionConfig {
        &self.collision
    }

    /// Replaces the page configuration, keeping everything else.
    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }
}

/// Margins around the content area of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 20.0,
        }
    }
}

/// Sheet size and margins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    width_mm: f64,
    height_mm: f64,
    margins: Margins,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_PAGE_WIDTH_MM,
            height_mm: DEFAULT_PAGE_HEIGHT_MM,
            margins: Margins::default(),
        }
    }
}

impl PageConfig {
    pub fn new(width_mm: f64, height_mm: f64, margins: Margins) -> Self {
        Self {
            width_mm,
            height_mm,
            margins,
        }
    }

    pub fn width_mm(&self) -> f64 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Derives the content area: the sheet minus its margins.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.margins.left,
            self.margins.top,
            self.width_mm - self.margins.left - self.margins.right,
            self.height_mm - self.margins.top - self.margins.bottom,
        )
    }
}

/// Label overlap resolution settings.
///
/// Labels have no text metrics in the layout engine, so their footprint is
/// either supplied per label or taken from here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    label_width: f64,
    label_height: f64,
    max_iterations: usize,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            label_width: 40.0,
            label_height: 8.0,
            max_iterations: 50,
        }
    }
}

impl CollisionConfig {
    /// Creates a new [`CollisionConfig`].
    ///
    /// # Arguments
    ///
    /// * `label_size` - Footprint used for labels without their own width/height.
    /// * `max_iterations` - Resolution passes before falling back to stacking.
    pub fn new(label_size: Size, max_iterations: usize) -> Self {
        Self {
            label_width: label_size.width(),
            label_height: label_size.height(),
            max_iterations,
        }
    }

    /// Returns the default label footprint
    pub fn label_size(&self) -> Size {
        Size::new(self.label_width, self.label_height)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}
