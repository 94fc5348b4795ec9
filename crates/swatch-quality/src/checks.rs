//! Individual artifact checks, in the order the gate runs them.
//!
//! Each check only reports; deciding acceptance is the gate's job.

use crate::profile::ValidationProfile;
use serde::{Deserialize, Serialize};
use swatch_core::color::{contrast_ratio, is_valid_hex};
use swatch_core::Artifact;

/// Single check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl Check {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }

    pub fn ok(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Ok, message)
    }

    pub fn warn(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Warn, message)
    }

    pub fn fail(name: &str, message: impl Into<String>) -> Self {
        Self::new(name, CheckStatus::Fail, message)
    }
}

/// Every hex must be `#RRGGBB`.
pub fn hex_format(artifact: &Artifact) -> Vec<Check> {
    let bad: Vec<Check> = artifact
        .colors
        .iter()
        .filter(|(_, c)| !is_valid_hex(&c.hex))
        .map(|(role, c)| Check::fail("hex_format", format!("color '{}' has invalid hex '{}'", role, c.hex)))
        .collect();
    if bad.is_empty() {
        vec![Check::ok("hex_format", format!("{} colors well-formed", artifact.colors.len()))]
    } else {
        bad
    }
}

/// primary is recoverable; text and background are not.
pub fn required_roles(artifact: &Artifact) -> Vec<Check> {
    let mut checks = Vec::new();
    if artifact.primary().is_none() {
        checks.push(Check::warn("required_roles", "no primary color"));
    }
    if artifact.background().is_none() {
        checks.push(Check::fail("required_roles", "required role 'background' missing"));
    }
    if artifact.text().is_none() {
        checks.push(Check::fail("required_roles", "required role 'text' missing"));
    }
    if checks.is_empty() {
        checks.push(Check::ok("required_roles", "primary, background and text present"));
    }
    checks
}

/// Duplicate hex values across roles. text == background is fatal.
pub fn duplicates(artifact: &Artifact) -> Vec<Check> {
    let mut checks = Vec::new();

    if let (Some(text_key), Some(background_key)) = (&artifact.roles.text, &artifact.roles.background) {
        let same_entry = text_key == background_key;
        let same_hex = match (artifact.text(), artifact.background()) {
            (Some(t), Some(b)) => t.hex.eq_ignore_ascii_case(&b.hex),
            _ => false,
        };
        if same_entry || same_hex {
            checks.push(Check::fail(
                "duplicates",
                format!("text '{}' and background '{}' share one color", text_key, background_key),
            ));
        }
    }

    let entries: Vec<(&str, String)> = artifact
        .colors
        .iter()
        .map(|(role, c)| (role.as_str(), c.hex.to_ascii_uppercase()))
        .collect();
    for (i, (role, hex)) in entries.iter().enumerate() {
        for (other, other_hex) in &entries[i + 1..] {
            if hex != other_hex || is_text_background_pair(artifact, role, other) {
                continue;
            }
            checks.push(Check::warn(
                "duplicates",
                format!("roles '{}' and '{}' share {}", role, other, hex),
            ));
        }
    }

    if checks.is_empty() {
        checks.push(Check::ok("duplicates", "all colors distinct"));
    }
    checks
}

fn is_text_background_pair(artifact: &Artifact, a: &str, b: &str) -> bool {
    let text = artifact.roles.text.as_deref();
    let background = artifact.roles.background.as_deref();
    (text == Some(a) && background == Some(b)) || (text == Some(b) && background == Some(a))
}

pub fn contrast(artifact: &Artifact, profile: &ValidationProfile) -> Vec<Check> {
    let (Some(text), Some(background)) = (artifact.text(), artifact.background()) else {
        return vec![Check::fail("contrast", "cannot measure contrast without text and background")];
    };
    let threshold = profile.contrast_threshold();
    match contrast_ratio(&text.hex, &background.hex) {
        Some(ratio) if ratio >= threshold => vec![Check::ok(
            "contrast",
            format!("contrast {:.2}:1 meets {} ({:.1}:1)", ratio, profile.level, threshold),
        )],
        Some(ratio) => vec![Check::fail(
            "contrast",
            format!(
                "contrast {:.2}:1 between {} and {} is below {} minimum {:.1}:1",
                ratio, text.hex, background.hex, profile.level, threshold
            ),
        )],
        None => vec![Check::fail("contrast", "contrast undefined for malformed text or background")],
    }
}

pub fn accessibility_block(artifact: &Artifact) -> Vec<Check> {
    let block = &artifact.accessibility;
    let mut checks: Vec<Check> = block
        .malformed
        .iter()
        .map(|field| Check::fail("accessibility_block", format!("accessibility.{} is ill-typed", field)))
        .collect();
    if !block.contrast_ratio.is_finite() || block.contrast_ratio < 1.0 {
        checks.push(Check::fail(
            "accessibility_block",
            format!("accessibility.contrastRatio {} out of range", block.contrast_ratio),
        ));
    }
    if checks.is_empty() {
        checks.push(Check::ok("accessibility_block", "accessibility block well-typed"));
    }
    checks
}

pub fn color_count(artifact: &Artifact, profile: &ValidationProfile) -> Vec<Check> {
    let count = artifact.colors.len();
    let (min, max) = profile.count_range();
    if (min..=max).contains(&count) {
        return vec![Check::ok("color_count", format!("{} colors", count))];
    }
    match profile.exact_count {
        Some(n) => vec![Check::fail("color_count", format!("expected exactly {} colors, got {}", n, count))],
        None => vec![Check::warn(
            "color_count",
            format!("{} colors outside the {} range {}-{}", count, profile.shape.as_str(), min, max),
        )],
    }
}

/// A requested base color must survive into the palette, ideally as primary.
pub fn base_color(artifact: &Artifact, profile: &ValidationProfile) -> Vec<Check> {
    let Some(base) = profile.base_color.as_deref() else {
        return vec![Check::ok("base_color", "no base color requested")];
    };
    if artifact.primary().is_some_and(|c| c.hex.eq_ignore_ascii_case(base)) {
        return vec![Check::ok("base_color", format!("primary is base color {}", base))];
    }
    match artifact.colors.iter().find(|(_, c)| c.hex.eq_ignore_ascii_case(base)) {
        Some((role, _)) => vec![Check::warn(
            "base_color",
            format!("base color {} present as '{}' but not bound as primary", base, role),
        )],
        None => vec![Check::fail("base_color", format!("base color {} missing from palette", base))],
    }
}

pub fn metadata(artifact: &Artifact) -> Vec<Check> {
    let mut checks = Vec::new();
    if artifact.name.trim().is_empty() {
        checks.push(Check::fail("metadata", "name is empty"));
    }
    if artifact.description.trim().is_empty() {
        checks.push(Check::fail("metadata", "description is empty"));
    }
    if artifact.tags.is_empty() {
        checks.push(Check::fail("metadata", "tags are empty"));
    }
    if checks.is_empty() {
        checks.push(Check::ok("metadata", "name, description and tags present"));
    }
    checks
}
