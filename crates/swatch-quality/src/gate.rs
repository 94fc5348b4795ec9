//! Artifact validator
//!
//! Runs every check against a profile and folds the results into a
//! verdict: any failed check rejects the artifact, warnings never do.

use crate::checks::{self, Check, CheckStatus};
use crate::profile::ValidationProfile;
use serde::{Deserialize, Serialize};
use swatch_core::Artifact;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub checks: Vec<Check>,
    /// Profile used for evaluation
    pub profile: String,
}

impl ValidationReport {
    pub fn summary(&self) -> String {
        if self.valid {
            format!("accepted with {} warning(s)", self.warnings.len())
        } else {
            format!("rejected: {}", self.errors.join("; "))
        }
    }
}

pub struct ArtifactValidator {
    profile: ValidationProfile,
}

impl ArtifactValidator {
    pub fn new(profile: ValidationProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ValidationProfile {
        &self.profile
    }

    pub fn validate(&self, artifact: &Artifact) -> ValidationReport {
        let mut all = Vec::new();
        all.extend(checks::hex_format(artifact));
        all.extend(checks::required_roles(artifact));
        all.extend(checks::duplicates(artifact));
        all.extend(checks::contrast(artifact, &self.profile));
        all.extend(checks::accessibility_block(artifact));
        all.extend(checks::color_count(artifact, &self.profile));
        all.extend(checks::base_color(artifact, &self.profile));
        all.extend(checks::metadata(artifact));

        let messages = |status: CheckStatus| {
            all.iter()
                .filter(|c| c.status == status)
                .map(|c| c.message.clone())
                .collect::<Vec<_>>()
        };
        let errors = messages(CheckStatus::Fail);
        let warnings = messages(CheckStatus::Warn);

        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
            checks: all,
            profile: self.profile.name.clone(),
        }
    }
}
