//! Generation invoker: one prompt in, one completion out.
//!
//! Transient failures retry the same model with exponential backoff. Once
//! retries run out (or on the first permanent failure) the configured
//! fallback model gets exactly one call.

use crate::config::InvokerConfig;
use async_trait::async_trait;
use std::sync::Arc;
use swatch_core::SwatchError;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure reported by a completion backend. Only the message is known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CompletionFailure {
    pub message: String,
}

impl CompletionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn kind(&self) -> FailureKind {
        FailureKind::classify(&self.message)
    }
}

/// Text-completion capability the pipeline is generic over.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, CompletionFailure>;
}

const TRANSIENT_MARKERS: &[&str] = &[
    "overloaded",
    "503",
    "unavailable",
    "timeout",
    "timed out",
    "rate limit",
    "busy",
    "quota",
    "429",
    "too many requests",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transient,
    Permanent,
}

impl FailureKind {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if TRANSIENT_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Transient
        } else {
            Self::Permanent
        }
    }
}

/// A successful model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Model that produced `text`
    pub model: String,
    /// Whether the fallback model was used
    pub escalated: bool,
    /// Calls made, including failed ones
    pub calls: u32,
}

pub struct GenerationInvoker {
    completion: Arc<dyn TextCompletion>,
    config: InvokerConfig,
}

impl GenerationInvoker {
    pub fn new(completion: Arc<dyn TextCompletion>, config: InvokerConfig) -> Self {
        Self { completion, config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Invoke `primary_model`, or the configured primary when `None`.
    ///
    /// On failure the error carries the primary model's last message, and
    /// `calls_made` reports how many calls were spent.
    pub async fn invoke(&self, prompt: &str, primary_model: Option<&str>) -> Result<Completion, InvokeError> {
        let primary = primary_model.unwrap_or(&self.config.primary_model);
        let mut calls = 0;
        let mut retry = 0;

        let primary_failure = loop {
            calls += 1;
            match self.completion.complete(primary, prompt).await {
                Ok(text) => {
                    return Ok(Completion {
                        text,
                        model: primary.to_string(),
                        escalated: false,
                        calls,
                    })
                }
                Err(failure) => {
                    let kind = failure.kind();
                    if kind == FailureKind::Permanent || retry >= self.config.retries {
                        warn!(model = %primary, ?kind, calls, "primary model gave up: {}", failure);
                        break failure;
                    }
                    let backoff = self.config.retry_backoff(retry);
                    retry += 1;
                    debug!(
                        "invoker: retry {}/{} on {} after {:?} ({})",
                        retry, self.config.retries, primary, backoff, failure
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        };

        let fallback = &self.config.fallback_model;
        calls += 1;
        match self.completion.complete(fallback, prompt).await {
            Ok(text) => {
                debug!(model = %fallback, calls, "escalated to fallback model");
                Ok(Completion {
                    text,
                    model: fallback.to_string(),
                    escalated: true,
                    calls,
                })
            }
            Err(failure) => {
                warn!(model = %fallback, "fallback model failed: {}", failure);
                Err(InvokeError {
                    error: SwatchError::GenerationUnavailable {
                        model: primary.to_string(),
                        message: primary_failure.message,
                    },
                    calls,
                })
            }
        }
    }
}

/// Invocation failure plus the calls it cost.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct InvokeError {
    pub error: SwatchError,
    pub calls: u32,
}

impl From<InvokeError> for SwatchError {
    fn from(e: InvokeError) -> Self {
        e.error
    }
}
