//! Swatch-IN: everything that enters the pipeline as loosely structured data
//!
//! Two translation layers live here:
//! - caller input → frozen [`RequestSpec`] (vocabularies and free-text directives)
//! - model completion → canonical [`swatch_core::Artifact`] (response normalization)
//!
//! # Example
//!
//! ```
//! use swatch_in::{normalize_response, RequestOptions, RequestSpec};
//!
//! let options = RequestOptions::new()
//!     .mood("playful")
//!     .industry("technology")
//!     .free_text("Use #FF5733 as base. 5 colors.");
//! let spec = RequestSpec::from_options(&options).unwrap();
//!
//! let raw = r##"["#FFF8F0", "#FF5733", "#C70039", "#581845", "#1B1B1B"]"##;
//! let normalized = normalize_response(raw, &spec).unwrap();
//! assert_eq!(normalized.artifact.colors.len(), 5);
//! ```

pub mod color_parse;
pub mod directives;
pub mod response;
pub mod spec;
pub mod vocabulary;

pub use directives::Directives;
pub use response::{extract_json, normalize_response, Normalized, RawColors, Repair};
pub use spec::{RequestOptions, RequestSpec};
pub use vocabulary::{ColorHarmony, Industry, Mood, PaletteType};
