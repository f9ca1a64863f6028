//! Feature-level content generators.
//!
//! Thin operations composed from the invoker, the lenient parser, the
//! fallback chains, and fixed prompt templates. Each one returns data the
//! web layer can serialize directly.

pub mod image;
pub mod mcq;
pub mod notes;
pub mod prompts;
pub mod solver;
pub mod summary;
pub mod video;

use thiserror::Error;

use crate::error::ProviderError;

pub use image::{study_image, ImageStudyPack, MIN_OCR_TEXT_LEN};
pub use mcq::{generate_mcqs, Mcq};
pub use notes::generate_notes;
pub use solver::solve_question;
pub use summary::summarize;
pub use video::{extract_video_id, is_youtube_url, study_video, VideoStudyPack};

/// Errors surfaced by the composite generators.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The given link is not a recognizable video URL.
    #[error("not a recognizable video URL")]
    InvalidVideoUrl,

    /// Every acquisition stage came up empty; the web layer maps this to a
    /// "service temporarily busy" response.
    #[error("no acquisition stage produced usable material")]
    NoSource,

    /// A hard provider failure outside the fallback chain.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
