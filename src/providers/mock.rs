//! Scripted mock provider for tests.
//!
//! Responses are queued ahead of time and consumed in order, so retry and
//! fallback behavior can be exercised deterministically without API calls.
//! An empty queue answers with a fixed placeholder.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{ImageData, LlmProvider};

/// One recorded call, for asserting on prompts in tests.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub with_image: bool,
}

/// Deterministic mock provider with a scripted reply queue.
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
    vision: bool,
}

impl MockProvider {
    /// Create a vision-capable mock.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            vision: true,
        }
    }

    /// Create a text-only mock, for exercising the unsupported-image path.
    pub fn text_only() -> Self {
        Self {
            vision: false,
            ..Self::new()
        }
    }

    /// Queue a successful reply.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue an error reply.
    pub fn push_err(&self, err: ProviderError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    /// Queue a rate-limit error, the common retry trigger.
    pub fn push_rate_limited(&self) {
        self.push_err(ProviderError::RateLimited("scripted 429".to_string()));
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn reply(&self, system: &str, user: &str, with_image: bool) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user: user.to_string(),
            with_image,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("mock response".to_string()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.reply(system, user, false)
    }

    async fn generate_with_image(
        &self,
        system: &str,
        user: &str,
        _image: &ImageData,
    ) -> Result<String> {
        if !self.vision {
            return Err(ProviderError::Unsupported(
                "mock provider configured without vision".to_string(),
            ));
        }
        self.reply(system, user, true)
    }

    fn supports_vision(&self) -> bool {
        self.vision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let mock = MockProvider::new();
        mock.push_ok("first");
        mock.push_ok("second");

        assert_eq!(mock.generate("s", "u").await.unwrap(), "first");
        assert_eq!(mock.generate("s", "u").await.unwrap(), "second");
        // Queue drained: placeholder.
        assert_eq!(mock.generate("s", "u").await.unwrap(), "mock response");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn scripted_errors_surface() {
        let mock = MockProvider::new();
        mock.push_err(ProviderError::Transport("down".to_string()));
        assert!(matches!(
            mock.generate("s", "u").await,
            Err(ProviderError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn text_only_mock_rejects_images() {
        let mock = MockProvider::text_only();
        let img = ImageData::new("zz", "image/png");
        assert!(matches!(
            mock.generate_with_image("s", "u", &img).await,
            Err(ProviderError::Unsupported(_))
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let mock = MockProvider::new();
        mock.push_ok("ok");
        let img = ImageData::new("zz", "image/png");
        mock.generate_with_image("sys", "usr", &img).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, "sys");
        assert_eq!(calls[0].user, "usr");
        assert!(calls[0].with_image);
    }
}
