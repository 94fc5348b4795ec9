//! Prompt template loading.
//!
//! Templates live in a YAML file with one entry per prompt section. The
//! default file is embedded at build time; an alternative can be loaded from
//! disk with the same format.

use serde::Deserialize;
use std::collections::HashMap;
use swatch_core::SwatchError;

/// Embedded default templates.
pub const DEFAULT_TEMPLATES: &str = include_str!("../templates/prompt-templates.yaml");

/// Section names every templates file must provide.
pub const REQUIRED_SECTIONS: [&str; 3] = ["system", "requirements", "exemplar"];

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, SwatchError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SwatchError::Template(format!("failed to read templates file {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content, checking every section is present
    pub fn from_yaml(yaml: &str) -> Result<Self, SwatchError> {
        let file: TemplatesFile = serde_yaml::from_str(yaml)
            .map_err(|e| SwatchError::Template(format!("failed to parse templates YAML: {}", e)))?;

        if let Some(missing) = REQUIRED_SECTIONS.iter().find(|s| !file.templates.contains_key(**s)) {
            return Err(SwatchError::Template(format!("missing template section '{}'", missing)));
        }
        Ok(file)
    }

    pub fn embedded() -> Result<Self, SwatchError> {
        Self::from_yaml(DEFAULT_TEMPLATES)
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }
}
