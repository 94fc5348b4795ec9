//! Swatch Quality: acceptance gate for normalized palettes
//!
//! Every artifact, whether it came from the model or from fallback
//! synthesis, passes through [`ArtifactValidator`] before it reaches a caller.
//!
//! # Example
//!
//! ```
//! use swatch_core::{AccessibilityLevel, Artifact, OutputShape};
//! use swatch_quality::{ArtifactValidator, ValidationProfile};
//!
//! let validator = ArtifactValidator::new(ValidationProfile::new(AccessibilityLevel::AA, OutputShape::Full));
//! let report = validator.validate(&Artifact::default());
//! assert!(!report.valid);
//! assert!(report.errors.contains(&"required role 'text' missing".to_string()));
//! ```

pub mod checks;
pub mod gate;
pub mod profile;

pub use checks::{Check, CheckStatus};
pub use gate::{ArtifactValidator, ValidationReport};
pub use profile::ValidationProfile;

use swatch_core::{AccessibilityLevel, Artifact, OutputShape};

/// Quick validation without holding a validator
pub fn validate(artifact: &Artifact, level: AccessibilityLevel, shape: OutputShape) -> ValidationReport {
    ArtifactValidator::new(ValidationProfile::new(level, shape)).validate(artifact)
}
