//! Generation report: what every attempt did, for operators.
//!
//! Callers always receive an artifact, so a degraded generation service is
//! only visible here (attempt counts, failure classes, fallback usage).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why a whole-pipeline attempt was abandoned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AttemptFailure {
    Composition(String),
    Generation(String),
    Unparsable(String),
    Invalid(Vec<String>),
}

impl AttemptFailure {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Composition(_) => "composition",
            Self::Generation(_) => "generation",
            Self::Unparsable(_) => "unparsable",
            Self::Invalid(_) => "invalid",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub prompt_hash: Option<String>,
    pub completion_hash: Option<String>,
    pub model: Option<String>,
    pub escalated: bool,
    pub calls: u32,
    pub latency_ms: u64,
    pub repairs: Vec<String>,
    pub warnings: Vec<String>,
    pub failure: Option<AttemptFailure>,
}

impl AttemptRecord {
    pub fn new(attempt: u32) -> Self {
        Self {
            attempt,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub trace_id: String,
    pub started_at: DateTime<Utc>,
    pub attempts: Vec<AttemptRecord>,
    pub fallback_used: bool,
}

impl GenerationReport {
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            attempts: Vec::new(),
            fallback_used: false,
        }
    }

    /// Calls made to the completion capability across all attempts.
    pub fn total_calls(&self) -> u32 {
        self.attempts.iter().map(|a| a.calls).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &AttemptFailure> {
        self.attempts.iter().filter_map(|a| a.failure.as_ref())
    }
}

impl Default for GenerationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Content fingerprint used in attempt records.
pub fn fingerprint(data: &[u8]) -> String {
    format!("blake3:{}", blake3::hash(data))
}
