//! Swatch Stages: the generation pipeline itself.
//!
//! # Pipeline Flow
//!
//! ```text
//! RequestOptions → RequestSpec → PromptText → Completion → Normalized → Verdict
//!    swatch-in       swatch-out    invoker      swatch-in    swatch-quality
//! ```
//!
//! [`PaletteGenerator`] owns the loop: failed attempts restart from prompt
//! composition, and exhausted attempts end in a deterministic fallback palette.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use swatch_in::RequestOptions;
//! use swatch_stages::{GeneratorConfig, PaletteGenerator, ReplayCompletion};
//!
//! let completion = Arc::new(ReplayCompletion::new(vec![
//!     r##"["#FFF8F0", "#FF5733", "#C70039", "#581845", "#1B1B1B"]"##.to_string(),
//! ]));
//! let generator = PaletteGenerator::new(completion, GeneratorConfig::default().without_backoff()).unwrap();
//! let options = RequestOptions::new().free_text("Use #FF5733 as base. 5 colors.");
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let artifact = runtime.block_on(generator.generate(&options)).unwrap();
//! assert_eq!(artifact.colors.len(), 5);
//! assert!(!artifact.is_fallback());
//! ```

pub mod config;
pub mod fallback;
pub mod invoker;
pub mod orchestrator;
pub mod replay;

pub use config::{GeneratorConfig, InvokerConfig};
pub use invoker::{Completion, CompletionFailure, FailureKind, GenerationInvoker, InvokeError, TextCompletion};
pub use orchestrator::{GenerationOutcome, PaletteGenerator};
pub use replay::ReplayCompletion;
