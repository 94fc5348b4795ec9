//! Validated generation request.

use crate::directives::{self, Directives};
use crate::vocabulary::{ColorHarmony, Industry, Mood, PaletteType};
use serde::{Deserialize, Serialize};
use swatch_core::{AccessibilityLevel, OutputShape, SwatchError};

/// Unvalidated request as it arrives from the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    pub mood: Option<String>,
    pub industry: Option<String>,
    #[serde(alias = "palette_type")]
    pub palette_type: Option<String>,
    #[serde(alias = "color_harmony")]
    pub color_harmony: Option<String>,
    #[serde(alias = "accessibility_level")]
    pub accessibility_level: Option<String>,
    #[serde(alias = "free_text", alias = "customPrompt")]
    pub free_text: Option<String>,
    pub model: Option<String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mood(mut self, mood: &str) -> Self {
        self.mood = Some(mood.to_string());
        self
    }

    pub fn industry(mut self, industry: &str) -> Self {
        self.industry = Some(industry.to_string());
        self
    }

    pub fn palette_type(mut self, palette_type: &str) -> Self {
        self.palette_type = Some(palette_type.to_string());
        self
    }

    pub fn color_harmony(mut self, harmony: &str) -> Self {
        self.color_harmony = Some(harmony.to_string());
        self
    }

    pub fn accessibility_level(mut self, level: &str) -> Self {
        self.accessibility_level = Some(level.to_string());
        self
    }

    pub fn free_text(mut self, text: &str) -> Self {
        self.free_text = Some(text.to_string());
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }
}

/// A frozen, validated request. Built once per incoming request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSpec {
    mood: Mood,
    industry: Industry,
    palette_type: PaletteType,
    color_harmony: ColorHarmony,
    accessibility_level: AccessibilityLevel,
    free_text: Option<String>,
    base_color: Option<String>,
    color_count: Option<u8>,
    keywords: Vec<String>,
    output_shape: OutputShape,
    model: Option<String>,
}

/// Blank strings count as "not supplied".
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_or_default<T>(value: &Option<String>) -> Result<T, SwatchError>
where
    T: std::str::FromStr<Err = SwatchError> + Default,
{
    supplied(value).map(str::parse).unwrap_or_else(|| Ok(T::default()))
}

impl RequestSpec {
    pub fn from_options(options: &RequestOptions) -> Result<Self, SwatchError> {
        let mood = parse_or_default::<Mood>(&options.mood)?;
        let industry = parse_or_default::<Industry>(&options.industry)?;
        let palette_type = parse_or_default::<PaletteType>(&options.palette_type)?;
        let color_harmony = parse_or_default::<ColorHarmony>(&options.color_harmony)?;
        let accessibility_level = match supplied(&options.accessibility_level) {
            Some(raw) => AccessibilityLevel::parse(raw)
                .ok_or_else(|| SwatchError::invalid_parameter("accessibilityLevel", raw))?,
            None => AccessibilityLevel::default(),
        };

        let free_text = supplied(&options.free_text).map(String::from);
        let found = match &free_text {
            Some(text) => directives::extract(text)?,
            None => Directives::default(),
        };

        // An explicit count at or below the simple maximum cannot fit the full role set.
        let (_, simple_max) = OutputShape::Simple.color_range();
        let output_shape = if found.wants_simple || found.color_count.is_some_and(|n| n as usize <= simple_max) {
            OutputShape::Simple
        } else {
            OutputShape::Full
        };

        Ok(Self {
            mood,
            industry,
            palette_type,
            color_harmony,
            accessibility_level,
            free_text,
            base_color: found.base_color,
            color_count: found.color_count,
            keywords: found.keywords,
            output_shape,
            model: supplied(&options.model).map(String::from),
        })
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn industry(&self) -> Industry {
        self.industry
    }

    pub fn palette_type(&self) -> PaletteType {
        self.palette_type
    }

    pub fn color_harmony(&self) -> ColorHarmony {
        self.color_harmony
    }

    pub fn accessibility_level(&self) -> AccessibilityLevel {
        self.accessibility_level
    }

    pub fn free_text(&self) -> Option<&str> {
        self.free_text.as_deref()
    }

    /// Mandatory primary color, uppercase `#RRGGBB`.
    pub fn base_color(&self) -> Option<&str> {
        self.base_color.as_deref()
    }

    /// Exact number of colors requested.
    pub fn color_count(&self) -> Option<u8> {
        self.color_count
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn output_shape(&self) -> OutputShape {
        self.output_shape
    }

    /// Model identifier hint; opaque.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Inclusive range of colors the artifact should carry.
    pub fn color_bounds(&self) -> (usize, usize) {
        match self.color_count {
            Some(n) => (n as usize, n as usize),
            None => self.output_shape.color_range(),
        }
    }

    /// Tags used when the model supplies none.
    pub fn default_tags(&self) -> Vec<String> {
        vec![self.mood.to_string(), self.industry.to_string()]
    }

    /// e.g. "Playful Real Estate Palette"
    pub fn default_name(&self) -> String {
        format!("{} {} Palette", title_case(self.mood.as_str()), title_case(self.industry.as_str()))
    }

    pub fn default_description(&self) -> String {
        format!("A {} palette for {}: {}", self.mood, self.industry, self.mood.description())
    }
}

fn title_case(word: &str) -> String {
    word.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl TryFrom<&RequestOptions> for RequestSpec {
    type Error = SwatchError;

    fn try_from(options: &RequestOptions) -> Result<Self, Self::Error> {
        Self::from_options(options)
    }
}
