//! Completion backend that replays recorded model output.

use crate::invoker::{CompletionFailure, TextCompletion};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves completions in order; the last one repeats once the rest are used.
pub struct ReplayCompletion {
    completions: Vec<String>,
    next: AtomicUsize,
}

impl ReplayCompletion {
    pub fn new(completions: Vec<String>) -> Self {
        Self {
            completions,
            next: AtomicUsize::new(0),
        }
    }

    /// Calls served so far.
    pub fn served(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for ReplayCompletion {
    async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, CompletionFailure> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.completions
            .get(index)
            .or_else(|| self.completions.last())
            .cloned()
            .ok_or_else(|| CompletionFailure::new("no recorded completions to replay"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_in_order_then_repeats() {
        let replay = ReplayCompletion::new(vec!["one".into(), "two".into()]);
        assert_eq!(replay.complete("m", "p").await.unwrap(), "one");
        assert_eq!(replay.complete("m", "p").await.unwrap(), "two");
        assert_eq!(replay.complete("m", "p").await.unwrap(), "two");
        assert_eq!(replay.served(), 3);
    }

    #[tokio::test]
    async fn test_empty_is_permanent_failure() {
        let replay = ReplayCompletion::new(Vec::new());
        let err = replay.complete("m", "p").await.unwrap_err();
        assert_eq!(err.kind(), crate::invoker::FailureKind::Permanent);
    }
}
