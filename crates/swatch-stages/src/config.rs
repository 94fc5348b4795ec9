//! Generator configuration
//!
//! Loaded from YAML, then overridden from `SWATCH_*` environment variables.
//!
//! ```yaml
//! max_attempts: 3
//! attempt_backoff_ms: 250
//! backoff_multiplier: 1.5
//! invoker:
//!   primary_model: palette-large
//!   fallback_model: palette-small
//!   retries: 2
//!   retry_backoff_ms: 200
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use swatch_core::SwatchError;

pub const ENV_PRIMARY_MODEL: &str = "SWATCH_PRIMARY_MODEL";
pub const ENV_FALLBACK_MODEL: &str = "SWATCH_FALLBACK_MODEL";
pub const ENV_MAX_ATTEMPTS: &str = "SWATCH_MAX_ATTEMPTS";
pub const ENV_RETRIES: &str = "SWATCH_RETRIES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokerConfig {
    /// Model used when the request carries no hint
    pub primary_model: String,

    /// Model tried exactly once after the primary gives up
    pub fallback_model: String,

    /// Same-model retries on transient failures
    pub retries: u32,

    /// Base delay, doubled per retry
    pub retry_backoff_ms: u64,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            primary_model: "palette-primary".to_string(),
            fallback_model: "palette-fallback".to_string(),
            retries: 2,
            retry_backoff_ms: 200,
        }
    }
}

impl InvokerConfig {
    pub fn retry_backoff(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(1u64 << retry.min(16)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub invoker: InvokerConfig,

    /// Whole-pipeline attempts before fallback synthesis
    pub max_attempts: u32,

    pub attempt_backoff_ms: u64,

    pub backoff_multiplier: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            invoker: InvokerConfig::default(),
            max_attempts: 3,
            attempt_backoff_ms: 250,
            backoff_multiplier: 1.5,
        }
    }
}

impl GeneratorConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, SwatchError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| SwatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk and apply environment overrides.
    pub fn load(path: &str) -> Result<Self, SwatchError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SwatchError::Config(format!("{}: {}", path, e)))?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, SwatchError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), SwatchError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; unset keys leave values alone.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SwatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(ENV_PRIMARY_MODEL) {
            self.invoker.primary_model = model;
        }
        if let Some(model) = lookup(ENV_FALLBACK_MODEL) {
            self.invoker.fallback_model = model;
        }
        if let Some(raw) = lookup(ENV_MAX_ATTEMPTS) {
            self.max_attempts = parse_number(ENV_MAX_ATTEMPTS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_RETRIES) {
            self.invoker.retries = parse_number(ENV_RETRIES, &raw)?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), SwatchError> {
        if self.max_attempts == 0 {
            return Err(SwatchError::Config("max_attempts must be at least 1".into()));
        }
        if !(self.backoff_multiplier.is_finite() && self.backoff_multiplier > 0.0) {
            return Err(SwatchError::Config(format!(
                "backoff_multiplier must be positive, got {}",
                self.backoff_multiplier
            )));
        }
        if self.invoker.primary_model.trim().is_empty() || self.invoker.fallback_model.trim().is_empty() {
            return Err(SwatchError::Config("model names must not be empty".into()));
        }
        Ok(())
    }

    /// Delay before restarting after `attempt` failed (1-based).
    pub fn attempt_backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(32) as i32;
        let millis = self.attempt_backoff_ms as f64 * self.backoff_multiplier.powi(exponent);
        Duration::from_millis(millis.round().min(u64::MAX as f64) as u64)
    }

    /// Zero delays everywhere.
    pub fn without_backoff(mut self) -> Self {
        self.attempt_backoff_ms = 0;
        self.invoker.retry_backoff_ms = 0;
        self
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u32, SwatchError> {
    raw.trim()
        .parse()
        .map_err(|_| SwatchError::Config(format!("{}: expected a number, got '{}'", key, raw)))
}
