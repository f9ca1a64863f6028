//! StudyForge LLM - resilient AI invocation core for the study assistant.
//!
//! This crate is the layer between the web routes and the outside world:
//! it decides *how* to call an unreliable, rate-limited AI/OCR service,
//! what to do when the call fails, and how to answer arithmetic questions
//! without ever executing attacker-controlled input.
//!
//! # Architecture
//!
//! - [`traits`] — provider and collaborator abstractions
//! - [`providers`] — OpenAI-style, Gemini-style, and mock clients
//! - [`invoker`] — bounded retry with linear backoff on rate limits
//! - [`fallback`] — ordered degradation chains (vision→OCR, transcript→guess)
//! - [`lenient`] — tolerant JSON recovery from model prose
//! - [`solve`] — allow-list arithmetic extraction and evaluation
//! - [`generate`] — the feature operations (summary, MCQs, notes, solve,
//!   image, video)
//! - [`settings`] — startup-time provider configuration
//!
//! # Providers
//!
//! | Provider | Chat | Vision | Notes |
//! |----------|------|--------|-------|
//! | OpenAI | ✓ | ✓ | system/user chat roles |
//! | Gemini | ✓ | ✓ | fixed system instruction |
//! | Mock | ✓ | ✓ | scripted replies, testing only |
//!
//! # Example
//!
//! ```ignore
//! use studyforge_llm::{ProviderSettings, ResilientInvoker};
//! use studyforge_llm::generate::summarize;
//!
//! let settings = ProviderSettings::from_env()?;
//! let invoker = ResilientInvoker::new(settings.build());
//! let summary = summarize(&invoker, material).await?;
//! ```

pub mod error;
pub mod fallback;
pub mod generate;
pub mod invoker;
pub mod lenient;
pub mod providers;
pub mod settings;
pub mod solve;
pub mod traits;

pub use error::{EvalError, ProviderError, Result};
pub use fallback::FallbackChain;
pub use generate::{
    generate_mcqs, generate_notes, solve_question, study_image, study_video, summarize,
    GenerateError, ImageStudyPack, Mcq, VideoStudyPack,
};
pub use invoker::{GenerationOutcome, GenerationRequest, ResilientInvoker};
pub use lenient::parse_json_lenient;
pub use providers::{GeminiProvider, MockProvider, OpenAiProvider};
pub use settings::{ProviderIdentity, ProviderSettings};
pub use solve::{evaluate, extract_expression, solve_arithmetic, EvaluationResult, Number};
pub use traits::{ImageData, LlmProvider, OcrEngine, TranscriptSegment, TranscriptSource};
