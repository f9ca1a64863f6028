//! Multiple-choice question generation.
//!
//! The provider is asked for strict JSON but rarely obliges perfectly, so
//! the raw text goes through the lenient parser. A parse failure or an
//! empty set degrades to a single placeholder MCQ — a visible "try again"
//! card — rather than an empty list the frontend would render as nothing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::generate::prompts::{mcq_prompt, MCQ_SYSTEM};
use crate::invoker::{GenerationRequest, ResilientInvoker};
use crate::lenient::parse_json_lenient;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    /// Four options, by convention. Not enforced here.
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
struct McqEnvelope {
    mcqs: Vec<Mcq>,
}

/// The degradation card returned when the provider's output is unusable.
fn placeholder() -> Mcq {
    Mcq {
        question: "Unable to generate MCQs. Please try again.".to_string(),
        options: vec![
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ],
        answer: "Option A".to_string(),
    }
}

/// Parse a provider reply into MCQs, degrading to the placeholder.
///
/// The `answer ∈ options` invariant is deliberately not enforced — model
/// output that labels the answer slightly differently still reaches the
/// student — but a mismatch is logged so prompt regressions show up.
pub fn parse_mcqs(raw: &str) -> Vec<Mcq> {
    let parsed = parse_json_lenient(raw)
        .and_then(|value| serde_json::from_value::<McqEnvelope>(value).ok());

    match parsed {
        Some(envelope) if !envelope.mcqs.is_empty() => {
            for mcq in &envelope.mcqs {
                if !mcq.options.contains(&mcq.answer) {
                    warn!(
                        question = %mcq.question,
                        answer = %mcq.answer,
                        "MCQ answer is not one of its options"
                    );
                }
            }
            envelope.mcqs
        }
        _ => {
            warn!("MCQ reply was unusable, returning placeholder");
            vec![placeholder()]
        }
    }
}

/// Generate `count` MCQs from study material.
pub async fn generate_mcqs(
    invoker: &ResilientInvoker,
    text: &str,
    count: usize,
) -> Result<Vec<Mcq>> {
    let request = GenerationRequest::new(MCQ_SYSTEM, mcq_prompt(count, text));
    let raw = invoker.invoke(&request).await.into_text()?;
    Ok(parse_mcqs(&raw))
}
