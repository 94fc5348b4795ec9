//! Orchestrator: drives compose → invoke → normalize → validate until an
//! artifact is accepted or attempts run out.
//!
//! ```text
//! Composing → Invoking → Normalizing → Validating → Accepted
//!     ↑                                     │
//!     └──────────── Retrying ←──────────────┘ (any failure)
//!                      │
//!                      └→ FallbackSynthesis (attempts exhausted)
//! ```

use crate::config::GeneratorConfig;
use crate::fallback;
use crate::invoker::{Completion, GenerationInvoker, TextCompletion};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use swatch_core::report::fingerprint;
use swatch_core::{Artifact, AttemptFailure, AttemptRecord, GenerationReport, SwatchError};
use swatch_in::{normalize_response, Normalized, RequestOptions, RequestSpec};
use swatch_out::{PromptComposer, PromptText};
use swatch_quality::{ArtifactValidator, ValidationProfile};
use tracing::{debug, info, info_span, warn, Instrument};

/// One state of a generation. Each variant carries what the next step needs.
#[derive(Debug)]
enum PipelineState {
    Composing,
    Invoking(PromptText),
    Normalizing(Completion),
    Validating(Normalized),
    Retrying(AttemptFailure),
    Accepted(Artifact),
    FallbackSynthesis,
}

/// Artifact plus the record of how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub artifact: Artifact,
    pub report: GenerationReport,
}

pub struct PaletteGenerator {
    invoker: GenerationInvoker,
    composer: PromptComposer,
    config: GeneratorConfig,
}

impl PaletteGenerator {
    pub fn new(completion: Arc<dyn TextCompletion>, config: GeneratorConfig) -> Result<Self, SwatchError> {
        Self::with_composer(completion, config, PromptComposer::embedded()?)
    }

    pub fn with_composer(
        completion: Arc<dyn TextCompletion>,
        config: GeneratorConfig,
        composer: PromptComposer,
    ) -> Result<Self, SwatchError> {
        config.validate()?;
        Ok(Self {
            invoker: GenerationInvoker::new(completion, config.invoker.clone()),
            composer,
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a palette. Only invalid request parameters surface as errors;
    /// every generation failure resolves to the fallback artifact.
    pub async fn generate(&self, options: &RequestOptions) -> Result<Artifact, SwatchError> {
        Ok(self.generate_with_report(options).await?.artifact)
    }

    pub async fn generate_with_report(&self, options: &RequestOptions) -> Result<GenerationOutcome, SwatchError> {
        let spec = RequestSpec::from_options(options)?;
        Ok(self.run(&spec).await)
    }

    /// Run the pipeline for an already validated request.
    pub async fn run(&self, spec: &RequestSpec) -> GenerationOutcome {
        let report = GenerationReport::new();
        let span = info_span!(
            "generate",
            trace_id = %report.trace_id,
            shape = spec.output_shape().as_str(),
            level = spec.accessibility_level().as_str(),
        );
        self.drive(spec, report).instrument(span).await
    }

    async fn drive(&self, spec: &RequestSpec, mut report: GenerationReport) -> GenerationOutcome {
        let profile = ValidationProfile::new(spec.accessibility_level(), spec.output_shape())
            .with_exact_count(spec.color_count().map(usize::from))
            .with_base_color(spec.base_color().map(String::from));
        let validator = ArtifactValidator::new(profile);
        let max_attempts = self.config.max_attempts;

        let mut attempt = 1;
        let mut record = AttemptRecord::new(attempt);
        let mut started = Instant::now();
        let mut state = PipelineState::Composing;

        let artifact = loop {
            state = match state {
                PipelineState::Composing => match self.composer.compose(spec) {
                    Ok(prompt) => {
                        record.prompt_hash = Some(fingerprint(prompt.to_string().as_bytes()));
                        PipelineState::Invoking(prompt)
                    }
                    Err(e) => PipelineState::Retrying(AttemptFailure::Composition(e.to_string())),
                },

                PipelineState::Invoking(prompt) => match self.invoker.invoke(&prompt.to_string(), spec.model()).await {
                    Ok(completion) => {
                        record.calls = completion.calls;
                        record.model = Some(completion.model.clone());
                        record.escalated = completion.escalated;
                        record.completion_hash = Some(fingerprint(completion.text.as_bytes()));
                        PipelineState::Normalizing(completion)
                    }
                    Err(e) => {
                        record.calls = e.calls;
                        PipelineState::Retrying(AttemptFailure::Generation(e.error.to_string()))
                    }
                },

                PipelineState::Normalizing(completion) => match normalize_response(&completion.text, spec) {
                    Ok(normalized) => {
                        for repair in &normalized.repairs {
                            debug!(attempt, "repair: {}", repair);
                        }
                        record.repairs = normalized.repairs.iter().map(ToString::to_string).collect();
                        PipelineState::Validating(normalized)
                    }
                    Err(e) => PipelineState::Retrying(AttemptFailure::Unparsable(e.to_string())),
                },

                PipelineState::Validating(normalized) => {
                    let verdict = validator.validate(&normalized.artifact);
                    for warning in &verdict.warnings {
                        debug!(attempt, "validation warning: {}", warning);
                    }
                    record.warnings = verdict.warnings;
                    if verdict.valid {
                        PipelineState::Accepted(normalized.artifact)
                    } else {
                        PipelineState::Retrying(AttemptFailure::Invalid(verdict.errors))
                    }
                }

                PipelineState::Retrying(failure) => {
                    warn!(attempt, max_attempts, kind = failure.label(), "attempt failed: {:?}", failure);
                    record.failure = Some(failure);
                    record.latency_ms = started.elapsed().as_millis() as u64;
                    report.attempts.push(std::mem::take(&mut record));

                    if attempt >= max_attempts {
                        PipelineState::FallbackSynthesis
                    } else {
                        let backoff = self.config.attempt_backoff(attempt);
                        debug!("orchestrator: restarting after {:?}", backoff);
                        tokio::time::sleep(backoff).await;
                        attempt += 1;
                        record = AttemptRecord::new(attempt);
                        started = Instant::now();
                        PipelineState::Composing
                    }
                }

                PipelineState::Accepted(artifact) => {
                    record.latency_ms = started.elapsed().as_millis() as u64;
                    report.attempts.push(std::mem::take(&mut record));
                    info!(
                        attempt,
                        calls = report.total_calls(),
                        colors = artifact.colors.len(),
                        "palette accepted"
                    );
                    break artifact;
                }

                PipelineState::FallbackSynthesis => {
                    report.fallback_used = true;
                    info!(attempts = attempt, calls = report.total_calls(), "using fallback palette");
                    break fallback::synthesize(spec);
                }
            };
        };

        GenerationOutcome { artifact, report }
    }
}
