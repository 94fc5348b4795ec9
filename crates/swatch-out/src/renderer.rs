//! Handlebars rendering for prompt sections.
//!
//! HTML escaping is disabled: prompts carry quotes, `#` and JSON verbatim.

use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;
use swatch_core::SwatchError;

use crate::templates::TemplatesFile;

handlebars_helper!(join: |items: array, sep: str| {
    items
        .iter()
        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
        .collect::<Vec<_>>()
        .join(sep)
});

/// Compiled renderer with registered helpers
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Compile every template in the file
    pub fn new(templates: &TemplatesFile) -> Result<Self, SwatchError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("join", Box::new(join));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| SwatchError::Template(format!("template '{}': {}", name, e)))?;
        }

        Ok(Self { handlebars })
    }

    /// Render a named template with data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String, SwatchError> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| SwatchError::Template(format!("render '{}': {}", template_name, e)))
    }
}
