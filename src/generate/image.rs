//! Image understanding: vision first, OCR second.
//!
//! The vision call is preferred (it reads diagrams and handwriting OCR
//! misses); the OCR path is the cheaper degradation when vision fails or
//! is rate limited past its budget. OCR output below a minimum length is
//! treated as noise and skips the stage.

use serde::Serialize;

use crate::fallback::FallbackChain;
use crate::generate::mcq::{generate_mcqs, Mcq};
use crate::generate::prompts::{VISION_PROMPT, VISION_SYSTEM};
use crate::generate::summary::summarize;
use crate::generate::GenerateError;
use crate::invoker::{GenerationRequest, ResilientInvoker};
use crate::traits::{ImageData, OcrEngine};

/// OCR output shorter than this (after trimming) is treated as empty.
pub const MIN_OCR_TEXT_LEN: usize = 10;

/// How many MCQs the image path asks for.
const IMAGE_MCQ_COUNT: usize = 7;

/// Study material generated from an uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageStudyPack {
    pub summary: String,
    pub mcqs: Vec<Mcq>,
}

/// Produce a summary and MCQs from an image.
///
/// Acquisition degrades vision → OCR; if both come up empty the whole
/// operation fails with [`GenerateError::NoSource`].
pub async fn study_image(
    invoker: &ResilientInvoker,
    ocr: &dyn OcrEngine,
    image: &ImageData,
) -> Result<ImageStudyPack, GenerateError> {
    let source = FallbackChain::new("image-understanding")
        .stage("vision", async {
            let request = GenerationRequest::new(VISION_SYSTEM, VISION_PROMPT)
                .with_image(image.clone());
            invoker.invoke(&request).await.into_text().map(Some)
        })
        .stage("ocr", async {
            let text = ocr.extract_text(image).await?;
            if text.trim().chars().count() < MIN_OCR_TEXT_LEN {
                Ok(None)
            } else {
                Ok(Some(text))
            }
        })
        .resolve()
        .await
        .ok_or(GenerateError::NoSource)?;

    let summary = summarize(invoker, &source).await?;
    let mcqs = generate_mcqs(invoker, &source, IMAGE_MCQ_COUNT).await?;

    Ok(ImageStudyPack { summary, mcqs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, Result};
    use crate::providers::MockProvider;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedOcr(&'static str);

    #[async_trait]
    impl OcrEngine for FixedOcr {
        async fn extract_text(&self, _image: &ImageData) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenOcr;

    #[async_trait]
    impl OcrEngine for BrokenOcr {
        async fn extract_text(&self, _image: &ImageData) -> Result<String> {
            Err(ProviderError::Transport("ocr sidecar down".to_string()))
        }
    }

    fn image() -> ImageData {
        ImageData::new("QUJD", "image/png")
    }

    const MCQ_REPLY: &str =
        r#"{"mcqs":[{"question":"Q","options":["A","B","C","D"],"answer":"A"}]}"#;

    #[tokio::test]
    async fn vision_path_is_preferred() {
        let mock = Arc::new(MockProvider::new());
        mock.push_ok("transcribed from the image");
        mock.push_ok("- summary");
        mock.push_ok(MCQ_REPLY);

        let invoker = ResilientInvoker::new(mock.clone());
        let ocr = FixedOcr("long enough ocr text");
        let pack = study_image(&invoker, &ocr, &image()).await.unwrap();

        assert_eq!(pack.summary, "- summary");
        assert_eq!(pack.mcqs.len(), 1);
        // First call carried the image; OCR never ran a provider call of its own.
        assert!(mock.calls()[0].with_image);
    }

    #[tokio::test]
    async fn ocr_is_the_degradation_path() {
        let mock = Arc::new(MockProvider::new());
        mock.push_err(ProviderError::Transport("vision down".to_string()));
        mock.push_ok("- summary from ocr text");
        mock.push_ok(MCQ_REPLY);

        let invoker = ResilientInvoker::new(mock.clone());
        let ocr = FixedOcr("photosynthesis converts light into chemical energy");
        let pack = study_image(&invoker, &ocr, &image()).await.unwrap();

        assert_eq!(pack.summary, "- summary from ocr text");
        // The summary call received the OCR text as material.
        assert!(mock.calls()[1].user.contains("photosynthesis"));
    }

    #[tokio::test]
    async fn short_ocr_output_is_skipped() {
        let mock = Arc::new(MockProvider::new());
        mock.push_err(ProviderError::Transport("vision down".to_string()));

        let invoker = ResilientInvoker::new(mock.clone());
        let ocr = FixedOcr("x1");
        let err = study_image(&invoker, &ocr, &image()).await.unwrap_err();

        assert!(matches!(err, GenerateError::NoSource));
    }

    #[tokio::test]
    async fn ocr_errors_are_swallowed_into_no_source() {
        let mock = Arc::new(MockProvider::new());
        mock.push_err(ProviderError::Transport("vision down".to_string()));

        let invoker = ResilientInvoker::new(mock.clone());
        let err = study_image(&invoker, &BrokenOcr, &image())
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::NoSource));
    }
}
