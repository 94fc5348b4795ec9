//! Data Model: Color, ColorMap, Artifact and the request vocabularies shared across crates
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees (0-359)
    pub h: u16,
    /// Saturation in percent
    pub s: u8,
    /// Lightness in percent
    pub l: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// `#RRGGBB`, uppercase
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub usage: String,
}

impl Color {
    pub fn named(mut self, name: impl Into<String>, usage: impl Into<String>) -> Self {
        self.name = name.into();
        self.usage = usage.into();
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessibilityLevel {
    #[default]
    AA,
    AAA,
}

impl AccessibilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AA => "AA",
            Self::AAA => "AAA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AA" => Some(Self::AA),
            "AAA" => Some(Self::AAA),
            _ => None,
        }
    }
}

impl fmt::Display for AccessibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output contract the model is asked to follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// Flat list of a few colors, minimal metadata
    Simple,
    /// Named semantic roles, gradients, interactive states
    #[default]
    Full,
}

impl OutputShape {
    /// Inclusive color-count range of the contract.
    pub fn color_range(&self) -> (usize, usize) {
        match self {
            Self::Simple => (3, 6),
            Self::Full => (8, 15),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Full => "full",
        }
    }
}

/// Insertion-ordered role → color mapping. Serializes as a JSON object.
pub type ColorMap = IndexMap<String, Color>;

/// Which `colors` keys play the required roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBindings {
    pub primary: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessibility {
    pub contrast_ratio: f64,
    pub wcag_compliant: bool,
    pub level: AccessibilityLevel,
    pub color_blind_safe: bool,
    #[serde(default)]
    pub notes: String,
    /// Fields the model supplied with the wrong type; never serialized.
    #[serde(skip)]
    pub malformed: Vec<String>,
}

/// The canonical palette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub name: String,
    pub description: String,
    pub shape: OutputShape,
    pub colors: ColorMap,
    pub roles: RoleBindings,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gradients: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub interactive_states: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shadows: BTreeMap<String, Value>,
    pub accessibility: Accessibility,
    pub tags: Vec<String>,
    pub mood: String,
    pub industry: String,
    pub palette_type: String,
    pub color_harmony: String,
}

impl Artifact {
    fn bound(&self, key: &Option<String>) -> Option<&Color> {
        key.as_deref().and_then(|k| self.colors.get(k))
    }

    pub fn primary(&self) -> Option<&Color> {
        self.bound(&self.roles.primary)
    }

    pub fn background(&self) -> Option<&Color> {
        self.bound(&self.roles.background)
    }

    pub fn text(&self) -> Option<&Color> {
        self.bound(&self.roles.text)
    }

    pub fn is_fallback(&self) -> bool {
        self.tags.iter().any(|t| t == crate::FALLBACK_TAG)
    }
}
