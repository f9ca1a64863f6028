//! Resilient provider invocation: bounded retry with linear backoff.
//!
//! Only rate-limit errors are retried; authentication, transport, and
//! malformed-request failures surface immediately, since repeating them
//! cannot succeed. The backoff sleep is the one suspension point in the
//! whole crate and honors a caller-supplied cancellation token, so an
//! abandoned web request does not pin a task for the full schedule.
//!
//! # Example
//!
//! ```ignore
//! let invoker = ResilientInvoker::new(settings.build());
//! let outcome = invoker
//!     .invoke(&GenerationRequest::new(SYSTEM, prompt))
//!     .await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::traits::{ImageData, LlmProvider};

/// Default attempt budget.
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff schedule: 15s × attempt number.
fn default_backoff() -> Vec<Duration> {
    vec![
        Duration::from_secs(15),
        Duration::from_secs(30),
        Duration::from_secs(45),
    ]
}

/// A single generation request, immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub image: Option<ImageData>,
    /// Total attempts allowed, including the first.
    pub max_attempts: u32,
    /// Wait before retry `n` is `backoff[n-1]`; the last entry repeats if
    /// the schedule is shorter than the attempt budget.
    pub backoff: Vec<Duration>,
}

impl GenerationRequest {
    /// Build a text request with the default retry policy.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            image: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: default_backoff(),
        }
    }

    /// Attach an image payload.
    pub fn with_image(mut self, image: ImageData) -> Self {
        self.image = Some(image);
        self
    }

    /// Override the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Override the backoff schedule.
    pub fn with_backoff(mut self, backoff: Vec<Duration>) -> Self {
        self.backoff = backoff;
        self
    }

    fn delay_before_retry(&self, attempt: u32) -> Duration {
        let idx = (attempt as usize).saturating_sub(1);
        self.backoff
            .get(idx)
            .or_else(|| self.backoff.last())
            .copied()
            .unwrap_or(Duration::ZERO)
    }
}

/// Terminal result of an invocation. Exactly one variant.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// The provider produced text.
    Success(String),
    /// Every attempt was rate limited.
    RateLimited {
        /// Attempts actually made.
        attempts: u32,
    },
    /// A non-retryable failure (or a cancelled wait).
    Failed(ProviderError),
}

impl GenerationOutcome {
    /// Collapse into a `Result` for callers that just want text.
    pub fn into_text(self) -> crate::error::Result<String> {
        match self {
            Self::Success(text) => Ok(text),
            Self::RateLimited { attempts } => Err(ProviderError::RateLimited(format!(
                "still rate limited after {} attempts",
                attempts
            ))),
            Self::Failed(err) => Err(err),
        }
    }
}

/// Wraps a provider with the retry policy carried by each request.
pub struct ResilientInvoker {
    provider: Arc<dyn LlmProvider>,
}

impl ResilientInvoker {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Invoke without external cancellation.
    pub async fn invoke(&self, request: &GenerationRequest) -> GenerationOutcome {
        self.invoke_cancellable(request, &CancellationToken::new())
            .await
    }

    /// Invoke, honoring `cancel` during backoff waits.
    pub async fn invoke_cancellable(
        &self,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> GenerationOutcome {
        let mut attempt: u32 = 1;

        loop {
            let result = match &request.image {
                Some(image) => {
                    self.provider
                        .generate_with_image(&request.system, &request.user, image)
                        .await
                }
                None => self.provider.generate(&request.system, &request.user).await,
            };

            match result {
                Ok(text) => {
                    if attempt > 1 {
                        debug!(attempt, "generation succeeded after retry");
                    }
                    return GenerationOutcome::Success(text);
                }
                Err(err) if err.retryable() && attempt < request.max_attempts => {
                    let delay = request.delay_before_retry(attempt);
                    warn!(
                        attempt,
                        max_attempts = request.max_attempts,
                        delay_secs = delay.as_secs(),
                        provider = self.provider.name(),
                        "rate limited, backing off before retry"
                    );
                    tokio::select! {
                        _ = sleep(delay) => {}
                        _ = cancel.cancelled() => {
                            debug!("backoff wait cancelled by caller");
                            return GenerationOutcome::Failed(ProviderError::Cancelled);
                        }
                    }
                    attempt += 1;
                }
                Err(err @ ProviderError::RateLimited(_)) => {
                    warn!(
                        attempts = attempt,
                        provider = self.provider.name(),
                        %err,
                        "attempt budget exhausted while rate limited"
                    );
                    return GenerationOutcome::RateLimited { attempts: attempt };
                }
                Err(err) => {
                    warn!(provider = self.provider.name(), %err, "generation failed");
                    return GenerationOutcome::Failed(err);
                }
            }
        }
    }
}
