//! The drawable area a layout is computed into.

use serde::{Deserialize, Serialize};

/// The content area of a drawing sheet, in output units.
///
/// Serializes with the camelCase keys used by callers
/// (`contentX`, `contentY`, `contentWidth`, `contentHeight`).
///
/// # Examples
///
/// ```
/// # use cabledraw_core::viewport::Viewport;
/// let viewport = Viewport::new(0.0, 0.0, 400.0, 100.0);
/// assert_eq!(viewport.center_y(), 50.0);
/// assert_eq!(viewport.right(), 400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    content_x: f64,
    content_y: f64,
    content_width: f64,
    content_height: f64,
}

impl Viewport {
    pub fn new(content_x: f64, content_y: f64, content_width: f64, content_height: f64) -> Self {
        Self {
            content_x,
            content_y,
            content_width,
            content_height,
        }
    }

    pub fn content_x(&self) -> f64 {
        self.content_x
    }

    pub fn content_y(&self) -> f64 {
        self.content_y
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Returns the right edge of the content area
    pub fn right(&self) -> f64 {
        self.content_x + self.content_width
    }

    /// Returns the vertical centerline of the content area
    pub fn center_y(&self) -> f64 {
        self.content_y + self.content_height / 2.0
    }

    /// Returns true if every field is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.content_x,
            self.content_y,
            self.content_width,
            self.content_height,
        ]
        .iter()
        .all(|value| value.is_finite())
    }
}
