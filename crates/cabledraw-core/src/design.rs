//! The validated cable-design description consumed by the layout engine.
//!
//! A [`CableDesign`] is produced by an external validator from the shared
//! cable-design schema. The layout engine only reads it; nothing in this
//! module checks semantics beyond what deserialization enforces.
//!
//! Field names follow the wire format (`oal_mm`, `offset_x`, `endA_pin`, ...)
//! so a design round-trips through JSON unchanged.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::geometry::Axis;

/// A complete cable-assembly description.
///
/// # Examples
///
/// ```
/// # use cabledraw_core::design::{Anchor, CableDesign, Dimensions, Label};
/// let design = CableDesign::new(Dimensions::new(150.0, 2.0))
///     .with_label(Label::new(Anchor::Cable).with_text("ASSY-01"));
///
/// assert_eq!(design.labels().len(), 1);
/// assert_eq!(design.dimensions().oal_mm(), 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableDesign {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,

    dimensions: Dimensions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    cable: Option<Cable>,

    #[serde(default)]
    nets: Vec<Net>,

    #[serde(default)]
    labels: Vec<Label>,
}

impl CableDesign {
    /// Creates a design with the given dimensions and nothing else.
    pub fn new(dimensions: Dimensions) -> Self {
        Self {
            meta: None,
            dimensions,
            cable: None,
            nets: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn with_cable(mut self, cable: Cable) -> Self {
        self.cable = Some(cable);
        self
    }

    pub fn with_net(mut self, net: Net) -> Self {
        self.nets.push(net);
        self
    }

    /// Appends a label; its position in the sequence is its identity.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }

    pub fn dimensions(&self) -> &Dimensions {
        &self.dimensions
    }

    pub fn cable(&self) -> Option<&Cable> {
        self.cable.as_ref()
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

/// Assembly metadata carried through for the serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub assembly_id: String,
    pub schema_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Physical dimensions of the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    oal_mm: f64,
    tolerance_mm: f64,
    #[serde(default)]
    broken_dim: bool,
}

impl Dimensions {
    pub fn new(oal_mm: f64, tolerance_mm: f64) -> Self {
        Self {
            oal_mm,
            tolerance_mm,
            broken_dim: false,
        }
    }

    /// Marks the dimension line to be drawn with a break symbol.
    pub fn with_broken_dim(mut self, broken_dim: bool) -> Self {
        self.broken_dim = broken_dim;
        self
    }

    /// Overall length in millimetres
    pub fn oal_mm(&self) -> f64 {
        self.oal_mm
    }

    pub fn tolerance_mm(&self) -> f64 {
        self.tolerance_mm
    }

    pub fn broken_dim(&self) -> bool {
        self.broken_dim
    }
}

/// The drawing feature a label is positioned relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anchor {
    EndA,
    EndB,
    Cable,
    Dimension,
}

impl Anchor {
    /// Returns the wire-format name of this anchor
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::EndA => "endA",
            Anchor::EndB => "endB",
            Anchor::Cable => "cable",
            Anchor::Dimension => "dimension",
        }
    }

    /// Returns the axis along which labels on this anchor are spread apart.
    ///
    /// Connector labels stack above and below their connector; cable and
    /// dimension labels spread along the cable.
    pub fn preferred_axis(self) -> Axis {
        match self {
            Anchor::EndA | Anchor::EndB => Axis::Vertical,
            Anchor::Cable | Anchor::Dimension => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an anchor name is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown anchor `{0}`, expected one of endA, endB, cable, dimension")]
pub struct ParseAnchorError(pub String);

impl FromStr for Anchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "endA" => Ok(Anchor::EndA),
            "endB" => Ok(Anchor::EndB),
            "cable" => Ok(Anchor::Cable),
            "dimension" => Ok(Anchor::Dimension),
            other => Err(ParseAnchorError(other.to_string())),
        }
    }
}

/// A label or callout placed on the drawing.
///
/// The anchor is kept as the name the caller supplied and resolved with
/// [`Label::anchor`], so a design carrying an unknown anchor still loads and
/// the layout engine can report exactly which label is at fault.
///
/// Any fields besides the ones the layout engine reads (typically `text`)
/// are preserved in [`Label::display`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    anchor: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset_x: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    offset_y: Option<f64>,

    /// Footprint width; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<f64>,

    /// Footprint height; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,

    #[serde(flatten)]
    display: Map<String, Value>,
}

impl Label {
    pub fn new(anchor: Anchor) -> Self {
        Self::with_anchor_name(anchor.as_str())
    }

    /// Creates a label from a raw anchor name without checking it.
    pub fn with_anchor_name(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            offset_x: None,
            offset_y: None,
            width: None,
            height: None,
            display: Map::new(),
        }
    }

    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = Some(offset_x);
        self.offset_y = Some(offset_y);
        self
    }

    /// Sets a caller-supplied footprint for collision resolution.
    pub fn with_footprint(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.display
            .insert("text".to_string(), Value::String(text.into()));
        self
    }

    /// Resolves the anchor name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseAnchorError`] if the name is not a known anchor.
    pub fn anchor(&self) -> Result<Anchor, ParseAnchorError> {
        self.anchor.parse()
    }

    /// Returns the anchor name exactly as supplied
    pub fn anchor_name(&self) -> &str {
        &self.anchor
    }

    /// Horizontal offset from the anchor point, zero when absent
    pub fn offset_x(&self) -> f64 {
        self.offset_x.unwrap_or(0.0)
    }

    /// Vertical offset from the anchor point, zero when absent
    pub fn offset_y(&self) -> f64 {
        self.offset_y.unwrap_or(0.0)
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Returns the display text, if the label carries one
    pub fn text(&self) -> Option<&str> {
        self.display.get("text").and_then(Value::as_str)
    }

    /// Caller-defined display fields, untouched by layout
    pub fn display(&self) -> &Map<String, Value> {
        &self.display
    }
}

/// Cable construction, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cable {
    Ribbon {
        ways: u32,
        pitch_in: f64,
        #[serde(default)]
        red_stripe: bool,
    },
    Round {
        conductors: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        awg: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shield: Option<CableShield>,
    },
}

/// Overall cable shielding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CableShield {
    None,
    Foil,
    Braid,
    FoilBraid,
}

/// Termination of a single conductor's shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetShield {
    None,
    FoldBack,
    Isolated,
    Pigtail,
}

/// A wire connecting a pin on end A to a pin on end B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub circuit: String,
    #[serde(rename = "endA_pin")]
    pub end_a_pin: String,
    #[serde(rename = "endB_pin")]
    pub end_b_pin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield: Option<NetShield>,
}

impl Net {
    pub fn new(
        circuit: impl Into<String>,
        end_a_pin: impl Into<String>,
        end_b_pin: impl Into<String>,
    ) -> Self {
        Self {
            circuit: circuit.into(),
            end_a_pin: end_a_pin.into(),
            end_b_pin: end_b_pin.into(),
            color: None,
            shield: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}
