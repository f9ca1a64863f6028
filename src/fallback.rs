//! Ordered fallback stages with graceful degradation.
//!
//! Each feature that has more than one way to acquire its material (vision
//! vs. OCR, transcript vs. URL guess) encodes the preference order as a
//! chain. Stages run strictly in sequence — later stages cost provider
//! budget, so they are only attempted when earlier ones fail — and a stage
//! error is logged and treated as "no output", never propagated past the
//! chain. A fully dry chain resolves to `None`; the caller maps that to a
//! user-facing "service temporarily busy" message.

use futures::future::BoxFuture;
use std::future::Future;
use tracing::{debug, warn};

use crate::error::Result;

/// An ordered sequence of named stages, resolved lazily.
///
/// Stage futures are not polled until their turn comes, so building the
/// chain does no work.
pub struct FallbackChain<'a> {
    feature: String,
    stages: Vec<(String, BoxFuture<'a, Result<Option<String>>>)>,
}

impl<'a> FallbackChain<'a> {
    /// Start a chain for the named feature (used in logs only).
    pub fn new(feature: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage. `None` or empty text means "try the next stage".
    pub fn stage<F>(mut self, name: impl Into<String>, fut: F) -> Self
    where
        F: Future<Output = Result<Option<String>>> + Send + 'a,
    {
        self.stages.push((name.into(), Box::pin(fut)));
        self
    }

    /// Run stages in order and return the first non-empty text.
    pub async fn resolve(self) -> Option<String> {
        for (name, fut) in self.stages {
            match fut.await {
                Ok(Some(text)) if !text.trim().is_empty() => {
                    debug!(feature = %self.feature, stage = %name, "stage produced output");
                    return Some(text);
                }
                Ok(_) => {
                    debug!(feature = %self.feature, stage = %name, "stage produced no output");
                }
                Err(err) => {
                    warn!(
                        feature = %self.feature,
                        stage = %name,
                        %err,
                        "stage failed, degrading to next stage"
                    );
                }
            }
        }
        warn!(feature = %self.feature, "no fallback stage produced output");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn first_non_empty_stage_wins() {
        let result = FallbackChain::new("test")
            .stage("one", async { Ok(None) })
            .stage("two", async { Ok(Some("ok".to_string())) })
            .resolve()
            .await;
        assert_eq!(result, Some("ok".to_string()));
    }

    #[tokio::test]
    async fn all_dry_resolves_to_none() {
        let result = FallbackChain::new("test")
            .stage("one", async { Ok(None) })
            .stage("two", async { Ok(None) })
            .resolve()
            .await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn stage_errors_are_swallowed() {
        let result = FallbackChain::new("test")
            .stage("one", async {
                Err(ProviderError::Transport("down".to_string()))
            })
            .stage("two", async { Ok(Some("recovered".to_string())) })
            .resolve()
            .await;
        assert_eq!(result, Some("recovered".to_string()));
    }

    #[tokio::test]
    async fn whitespace_only_output_counts_as_empty() {
        let result = FallbackChain::new("test")
            .stage("one", async { Ok(Some("   ".to_string())) })
            .stage("two", async { Ok(Some("real".to_string())) })
            .resolve()
            .await;
        assert_eq!(result, Some("real".to_string()));
    }

    #[tokio::test]
    async fn later_stages_do_no_work_when_earlier_succeed() {
        let touched = AtomicBool::new(false);
        let result = FallbackChain::new("test")
            .stage("one", async { Ok(Some("early".to_string())) })
            .stage("two", async {
                touched.store(true, Ordering::SeqCst);
                Ok(Some("late".to_string()))
            })
            .resolve()
            .await;
        assert_eq!(result, Some("early".to_string()));
        assert!(!touched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn empty_chain_is_dry() {
        assert_eq!(FallbackChain::new("test").resolve().await, None);
    }
}
