//! Swatch-OUT: RequestSpec → natural-language prompt for the model
//!
//! A prompt is three sections, always in this order:
//! 1. system block: output contract and hard constraints
//! 2. requirements block: one line per request parameter, from the fixed
//!    vocabulary descriptions
//! 3. exemplar: a JSON skeleton of the expected shape
//!
//! Composition is pure and deterministic, so it is safe to repeat on retries.
//!
//! # Example
//!
//! ```
//! use swatch_in::{RequestOptions, RequestSpec};
//! use swatch_out::compose;
//!
//! let spec = RequestSpec::from_options(&RequestOptions::new().mood("playful")).unwrap();
//! let prompt = compose(&spec).unwrap();
//! assert!(prompt.to_string().contains("Bright, cheerful colors"));
//! ```

pub mod exemplar;
pub mod renderer;
pub mod templates;

use once_cell::sync::Lazy;
use renderer::TemplateRenderer;
use serde_json::{json, Value};
use std::fmt;
use swatch_core::color::contrast_threshold;
use swatch_core::{OutputShape, SwatchError};
use swatch_in::RequestSpec;
use templates::TemplatesFile;

static DEFAULT_COMPOSER: Lazy<Result<PromptComposer, SwatchError>> = Lazy::new(PromptComposer::embedded);

/// Rendered prompt, kept in sections for inspection and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText {
    pub system: String,
    pub requirements: String,
    pub exemplar: String,
}

impl PromptText {
    pub fn sections(&self) -> [&str; 3] {
        [&self.system, &self.requirements, &self.exemplar]
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}\n\n{}", self.system.trim_end(), self.requirements.trim_end(), self.exemplar.trim_end())
    }
}

pub struct PromptComposer {
    renderer: TemplateRenderer,
}

impl PromptComposer {
    pub fn new(templates: &TemplatesFile) -> Result<Self, SwatchError> {
        Ok(Self {
            renderer: TemplateRenderer::new(templates)?,
        })
    }

    /// Composer over the templates compiled into the crate
    pub fn embedded() -> Result<Self, SwatchError> {
        Self::new(&TemplatesFile::embedded()?)
    }

    /// Composer over a templates file on disk
    pub fn load(path: &str) -> Result<Self, SwatchError> {
        Self::new(&TemplatesFile::load(path)?)
    }

    pub fn compose(&self, spec: &RequestSpec) -> Result<PromptText, SwatchError> {
        let data = template_data(spec);
        Ok(PromptText {
            system: self.renderer.render("system", &data)?,
            requirements: self.renderer.render("requirements", &data)?,
            exemplar: self.renderer.render("exemplar", &data)?,
        })
    }
}

/// Compose with the embedded templates.
pub fn compose(spec: &RequestSpec) -> Result<PromptText, SwatchError> {
    match &*DEFAULT_COMPOSER {
        Ok(composer) => composer.compose(spec),
        Err(e) => Err(e.clone()),
    }
}

fn template_data(spec: &RequestSpec) -> Value {
    let level = spec.accessibility_level();
    let (min_colors, max_colors) = spec.color_bounds();
    json!({
        "shape": spec.output_shape().as_str(),
        "simple": spec.output_shape() == OutputShape::Simple,
        "exact_count": spec.color_count(),
        "min_colors": min_colors,
        "max_colors": max_colors,
        "level": level.as_str(),
        "contrast_target": format!("{:.1}", contrast_threshold(level)),
        "mood": spec.mood().as_str(),
        "mood_description": spec.mood().description(),
        "industry": spec.industry().as_str(),
        "industry_description": spec.industry().description(),
        "palette_type": spec.palette_type().as_str(),
        "palette_type_description": spec.palette_type().description(),
        "color_harmony": spec.color_harmony().as_str(),
        "color_harmony_description": spec.color_harmony().description(),
        "base_color": spec.base_color(),
        "keywords": spec.keywords(),
        "free_text": spec.free_text(),
        "exemplar": exemplar::render(spec.output_shape(), spec.color_count()),
    })
}
