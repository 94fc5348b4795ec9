//! Shared test doubles for pipeline tests.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use swatch_stages::{CompletionFailure, GeneratorConfig, InvokerConfig, PaletteGenerator, TextCompletion};

/// Completion double that plays back a script. The final step repeats
/// forever once the script is exhausted.
pub struct ScriptedCompletion {
    steps: Mutex<VecDeque<Result<String, CompletionFailure>>>,
    calls: AtomicUsize,
    models: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(steps: Vec<Result<String, CompletionFailure>>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            calls: AtomicUsize::new(0),
            models: Mutex::new(Vec::new()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Always answers with `text`.
    pub fn always(text: &str) -> Arc<Self> {
        Self::new(vec![Ok(text.to_string())])
    }

    /// Always fails with `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(vec![Err(CompletionFailure::new(message))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.models.lock().unwrap().push(model.to_string());
        self.prompts.lock().unwrap().push(prompt.to_string());

        let mut steps = self.steps.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps
                .front()
                .cloned()
                .unwrap_or_else(|| Err(CompletionFailure::new("empty script")))
        }
    }
}

pub fn fast_config() -> GeneratorConfig {
    GeneratorConfig {
        invoker: InvokerConfig {
            primary_model: "primary-model".into(),
            fallback_model: "fallback-model".into(),
            ..InvokerConfig::default()
        },
        ..GeneratorConfig::default()
    }
    .without_backoff()
}

pub fn generator(script: &Arc<ScriptedCompletion>) -> PaletteGenerator {
    PaletteGenerator::new(script.clone(), fast_config()).unwrap()
}

pub fn fail(message: &str) -> Result<String, CompletionFailure> {
    Err(CompletionFailure::new(message))
}

pub fn ok(text: &str) -> Result<String, CompletionFailure> {
    Ok(text.to_string())
}

/// Keyed full-shape palette with 8 roles, passing AAA.
pub const FULL_RESPONSE: &str = r##"```json
{
  "name": "Ocean Tech",
  "description": "Cool blues for a developer platform",
  "colors": {
    "primary": { "hex": "#0EA5E9", "name": "Sky", "rgb": "rgb(14, 165, 233)" },
    "secondary": "#6366F1",
    "accent": "#F472B6",
    "background": "#F8FAFC",
    "surface": "#E2E8F0",
    "text": "#0F172A",
    "textSecondary": "#475569",
    "border": "#CBD5E1"
  },
  "gradients": { "hero": { "from": "#0EA5E9", "to": "#6366F1" } },
  "tags": ["ocean", "developer"]
}
```"##;

/// Same shape, but gray text on white only reaches ~4.48:1.
pub const LOW_CONTRAST_RESPONSE: &str = r##"{
  "name": "Washed Out",
  "description": "Too pale to read",
  "colors": {
    "primary": "#0EA5E9",
    "secondary": "#6366F1",
    "accent": "#F472B6",
    "background": "#FFFFFF",
    "surface": "#E2E8F0",
    "text": "#777777",
    "textSecondary": "#475569",
    "border": "#CBD5E1"
  },
  "tags": ["pale"]
}"##;

/// Flat list for a "5 colors" request built around #FF5733.
pub const SUNSET_RESPONSE: &str = r##"Here is your palette:
{
  "name": "Sunset Pop",
  "description": "Warm sunset tones",
  "colors": [
    { "name": "Cream", "hex": "#fff8f0" },
    { "name": "Base", "hex": "#FF5733" },
    { "name": "Crimson", "hex": "#C70039" },
    { "name": "Plum", "hex": "#581845" },
    { "name": "Night", "hex": "#1B1B1B" }
  ]
}"##;
