//! Validation profiles
//!
//! A profile carries everything the checks need to know about the request
//! that produced an artifact: the accessibility target, the count contract
//! and the base color the palette was built around.

use serde::{Deserialize, Serialize};
use swatch_core::color::contrast_threshold;
use swatch_core::{AccessibilityLevel, OutputShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationProfile {
    /// Profile name (e.g., "full/AA", "simple/AAA")
    pub name: String,

    pub level: AccessibilityLevel,

    pub shape: OutputShape,

    /// Exact color count requested, if any
    pub exact_count: Option<usize>,

    /// Normalized `#RRGGBB` the palette must contain
    #[serde(default)]
    pub base_color: Option<String>,
}

impl ValidationProfile {
    pub fn new(level: AccessibilityLevel, shape: OutputShape) -> Self {
        Self {
            name: format!("{}/{}", shape.as_str(), level),
            level,
            shape,
            exact_count: None,
            base_color: None,
        }
    }

    pub fn with_exact_count(mut self, count: Option<usize>) -> Self {
        self.exact_count = count;
        self
    }

    pub fn with_base_color(mut self, base_color: Option<String>) -> Self {
        self.base_color = base_color;
        self
    }

    /// Minimum text/background contrast for the profile's level
    pub fn contrast_threshold(&self) -> f64 {
        contrast_threshold(self.level)
    }

    /// Inclusive count range; a single value when an exact count was asked for
    pub fn count_range(&self) -> (usize, usize) {
        match self.exact_count {
            Some(n) => (n, n),
            None => self.shape.color_range(),
        }
    }
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self::new(AccessibilityLevel::AA, OutputShape::Full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(ValidationProfile::new(AccessibilityLevel::AA, OutputShape::Full).contrast_threshold(), 4.5);
        assert_eq!(ValidationProfile::new(AccessibilityLevel::AAA, OutputShape::Simple).contrast_threshold(), 7.0);
    }

    #[test]
    fn test_count_range() {
        let profile = ValidationProfile::default();
        assert_eq!(profile.name, "full/AA");
        assert_eq!(profile.count_range(), (8, 15));
        assert_eq!(profile.with_exact_count(Some(6)).count_range(), (6, 6));
    }

    #[test]
    fn test_base_color_not_part_of_name() {
        let profile = ValidationProfile::default().with_base_color(Some("#FF5733".into()));
        assert_eq!(profile.name, "full/AA");
        assert_eq!(profile.base_color.as_deref(), Some("#FF5733"));
    }
}
