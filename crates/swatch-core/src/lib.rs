//! Swatch Core: color math, canonical palette model and error taxonomy
//!
//! Leaf crate shared by every stage of the generation pipeline.

pub mod color;
pub mod data_model;
pub mod error;
pub mod report;

pub use color::{contrast_ratio, contrast_threshold, format_color, hex_to_rgb, relative_luminance, rgb_to_hsl};
pub use data_model::{
    Accessibility, AccessibilityLevel, Artifact, Color, ColorMap, Hsl, OutputShape, Rgb, RoleBindings,
};
pub use error::{SwatchError, SwatchResult};
pub use report::{AttemptFailure, AttemptRecord, GenerationReport};

/// Tag carried by every artifact built without the model.
pub const FALLBACK_TAG: &str = "fallback";

/// Default background when the model supplies none.
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";
/// Text color paired with light backgrounds.
pub const DARK_TEXT: &str = "#111827";
/// Text color paired with dark backgrounds.
pub const LIGHT_TEXT: &str = "#FFFFFF";
