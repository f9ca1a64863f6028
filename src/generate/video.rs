//! Video study packs: transcript first, URL guess second.
//!
//! The transcript stage yields the real spoken content; when the fetch
//! fails or the video has no transcript, the provider is asked to infer
//! likely content from the URL alone — a lower-quality but non-empty
//! degradation. The chosen source text then feeds the summary, MCQ, and
//! notes generators.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::fallback::FallbackChain;
use crate::generate::mcq::{generate_mcqs, Mcq};
use crate::generate::notes::generate_notes;
use crate::generate::prompts::{video_guess_prompt, VIDEO_GUESS_SYSTEM};
use crate::generate::summary::summarize;
use crate::generate::GenerateError;
use crate::invoker::{GenerationRequest, ResilientInvoker};
use crate::traits::TranscriptSource;

/// How many MCQs the video path asks for.
const VIDEO_MCQ_COUNT: usize = 7;

/// Combined study material generated from one video.
#[derive(Debug, Clone, Serialize)]
pub struct VideoStudyPack {
    pub summary: String,
    pub mcqs: Vec<Mcq>,
    pub notes: String,
}

/// Whether `url` points at YouTube at all.
pub fn is_youtube_url(url: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/").unwrap()
        })
        .is_match(url)
}

/// Pull the video id out of the common YouTube URL shapes.
pub fn extract_video_id(url: &str) -> Option<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        [
            r"v=([^&]+)",
            r"youtu\.be/([^?&]+)",
            r"youtube\.com/embed/([^?&]+)",
            r"youtube\.com/shorts/([^?&]+)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    });

    patterns
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .map(|captures| captures[1].to_string())
}

/// Produce a summary, MCQs, and notes from a video link.
pub async fn study_video(
    invoker: &ResilientInvoker,
    transcripts: &dyn TranscriptSource,
    url: &str,
) -> Result<VideoStudyPack, GenerateError> {
    if !is_youtube_url(url) {
        return Err(GenerateError::InvalidVideoUrl);
    }
    let video_id = extract_video_id(url).ok_or(GenerateError::InvalidVideoUrl)?;

    let source = FallbackChain::new("video-summarization")
        .stage("transcript", async {
            let segments = transcripts.fetch_transcript(&video_id).await?;
            let joined = segments
                .iter()
                .map(|segment| segment.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            if joined.trim().is_empty() {
                Ok(None)
            } else {
                Ok(Some(joined))
            }
        })
        .stage("url-guess", async {
            let request =
                GenerationRequest::new(VIDEO_GUESS_SYSTEM, video_guess_prompt(url));
            invoker.invoke(&request).await.into_text().map(Some)
        })
        .resolve()
        .await
        .ok_or(GenerateError::NoSource)?;

    let summary = summarize(invoker, &source).await?;
    let mcqs = generate_mcqs(invoker, &source, VIDEO_MCQ_COUNT).await?;
    let notes = generate_notes(invoker, &source).await?;

    Ok(VideoStudyPack {
        summary,
        mcqs,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProviderError, Result};
    use crate::providers::MockProvider;
    use crate::traits::TranscriptSegment;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedTranscript(Vec<&'static str>);

    #[async_trait]
    impl TranscriptSource for FixedTranscript {
        async fn fetch_transcript(&self, _video_id: &str) -> Result<Vec<TranscriptSegment>> {
            Ok(self
                .0
                .iter()
                .map(|t| TranscriptSegment {
                    text: t.to_string(),
                })
                .collect())
        }
    }

    struct MissingTranscript;

    #[async_trait]
    impl TranscriptSource for MissingTranscript {
        async fn fetch_transcript(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
            Err(ProviderError::Transport(format!(
                "no transcript for {}",
                video_id
            )))
        }
    }

    const MCQ_REPLY: &str =
        r#"{"mcqs":[{"question":"Q","options":["A","B","C","D"],"answer":"A"}]}"#;

    #[test]
    fn video_id_extraction_handles_all_shapes() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(extract_video_id("https://example.com/video"), None);
    }

    #[test]
    fn youtube_url_validation() {
        assert!(is_youtube_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_youtube_url("http://youtu.be/abc"));
        assert!(is_youtube_url("youtube.com/watch?v=abc"));
        assert!(!is_youtube_url("https://vimeo.com/12345"));
    }

    #[tokio::test]
    async fn transcript_path_feeds_all_three_generators() {
        let mock = Arc::new(MockProvider::new());
        mock.push_ok("- summary");
        mock.push_ok(MCQ_REPLY);
        mock.push_ok("# notes");

        let invoker = ResilientInvoker::new(mock.clone());
        let source = FixedTranscript(vec!["light reactions", "dark reactions"]);
        let pack = study_video(
            &invoker,
            &source,
            "https://www.youtube.com/watch?v=abc123",
        )
        .await
        .unwrap();

        assert_eq!(pack.summary, "- summary");
        assert_eq!(pack.mcqs.len(), 1);
        assert_eq!(pack.notes, "# notes");

        // Segments were joined with spaces and fed to every generator.
        let calls = mock.calls();
        assert_eq!(calls.len(), 3);
        for call in &calls {
            assert!(call.user.contains("light reactions dark reactions"));
        }
    }

    #[tokio::test]
    async fn missing_transcript_falls_back_to_url_guess() {
        let mock = Arc::new(MockProvider::new());
        mock.push_ok("This video likely covers basic algebra.");
        mock.push_ok("- summary");
        mock.push_ok(MCQ_REPLY);
        mock.push_ok("# notes");

        let invoker = ResilientInvoker::new(mock.clone());
        let pack = study_video(
            &invoker,
            &MissingTranscript,
            "https://youtu.be/abc123",
        )
        .await
        .unwrap();

        assert_eq!(pack.summary, "- summary");
        let calls = mock.calls();
        // First call was the URL guess itself.
        assert_eq!(calls[0].system, VIDEO_GUESS_SYSTEM);
        assert!(calls[0].user.contains("https://youtu.be/abc123"));
        // Generators then consumed the guessed content.
        assert!(calls[1].user.contains("basic algebra"));
    }

    #[tokio::test]
    async fn empty_transcript_counts_as_missing() {
        let mock = Arc::new(MockProvider::new());
        mock.push_ok("guessed content for the video");
        mock.push_ok("- summary");
        mock.push_ok(MCQ_REPLY);
        mock.push_ok("# notes");

        let invoker = ResilientInvoker::new(mock.clone());
        let source = FixedTranscript(vec![]);
        let pack = study_video(&invoker, &source, "https://youtu.be/abc123")
            .await
            .unwrap();

        assert_eq!(pack.summary, "- summary");
        assert_eq!(mock.calls()[0].system, VIDEO_GUESS_SYSTEM);
    }

    #[tokio::test]
    async fn non_youtube_links_are_rejected_before_any_call() {
        let mock = Arc::new(MockProvider::new());
        let invoker = ResilientInvoker::new(mock.clone());

        let err = study_video(&invoker, &MissingTranscript, "https://vimeo.com/1")
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::InvalidVideoUrl));
        assert_eq!(mock.call_count(), 0);
    }
}
