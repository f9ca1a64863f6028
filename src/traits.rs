//! Provider and collaborator traits.
//!
//! # Trait-Based Provider Abstraction
//!
//! Using traits instead of concrete types enables:
//! - **Testing**: [`crate::providers::MockProvider`] for unit tests (no API calls)
//! - **Flexibility**: swap OpenAI-style and Gemini-style backends without
//!   touching feature code
//! - **Resilience**: the invoker and fallback chains operate on
//!   `Arc<dyn LlmProvider>` and never know which backend is live
//!
//! # Key Traits
//!
//! - [`LlmProvider`]: text and vision generation
//! - [`OcrEngine`]: text extraction from images (external collaborator)
//! - [`TranscriptSource`]: video transcripts (external collaborator)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An image payload for vision-capable calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    /// Base64-encoded image data (without data: URI prefix).
    pub data: String,

    /// MIME type of the image (e.g., "image/png", "image/jpeg").
    pub mime_type: String,
}

impl ImageData {
    /// Create new image data from a base64 string and MIME type.
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Render as a data URI (`data:image/png;base64,iVBORw0KGgo...`), the
    /// form OpenAI-style vision endpoints accept.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// A single transcript segment as returned by the transcript collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Spoken text of the segment.
    pub text: String,
}

/// Trait for LLM providers that can generate text (and optionally read
/// images).
///
/// `generate` submits a system prompt and a user prompt; how the two are
/// carried on the wire is the provider's business (separate chat roles for
/// OpenAI-style APIs, a fixed system instruction for Gemini-style APIs).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short name of this provider (for logs).
    fn name(&self) -> &str;

    /// The configured model.
    fn model(&self) -> &str;

    /// Generate text for the given system/user prompt pair.
    async fn generate(&self, system: &str, user: &str) -> Result<String>;

    /// Generate text for a prompt pair plus an image.
    ///
    /// Providers without vision support MUST fail with
    /// [`crate::ProviderError::Unsupported`] rather than silently dropping
    /// the image.
    async fn generate_with_image(
        &self,
        _system: &str,
        _user: &str,
        _image: &ImageData,
    ) -> Result<String> {
        Err(crate::error::ProviderError::Unsupported(
            format!("provider '{}' cannot accept images", self.name()),
        ))
    }

    /// Whether this provider accepts image payloads.
    fn supports_vision(&self) -> bool {
        false
    }
}

/// External OCR collaborator.
///
/// Only the boundary is specified here; the engine behind it (easyocr
/// sidecar, cloud OCR, ...) is the embedding application's choice.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Extract readable text from an image. May legitimately return an
    /// empty string when the image holds no text.
    async fn extract_text(&self, image: &ImageData) -> Result<String>;
}

/// External transcript-fetch collaborator.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video id. An error here means
    /// "not found / unavailable" and is handled by the fallback chain.
    async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}
