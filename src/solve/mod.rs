//! Arithmetic solve pipeline: extraction plus sandboxed evaluation.
//!
//! Used only by the "solve question" feature, and only when the input looks
//! arithmetic. Evaluator failures never escape this module as errors — they
//! become a textual non-answer, because a student asking a broken sum still
//! deserves a response.

pub mod eval;
pub mod extract;

use serde::Serialize;

pub use eval::{evaluate, Number, MAX_DEPTH};
pub use extract::extract_expression;

/// The rendered outcome of an arithmetic solve.
///
/// Always fully constructed: either a numeric `final_answer` with the steps
/// that produced it, or a textual fallback describing why none was found.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// Human-readable computation steps.
    pub steps: Vec<String>,
    /// The answer line shown to the student.
    pub final_answer: String,
}

impl EvaluationResult {
    /// Render steps and answer as one display block.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("{}) {}\n", i + 1, step));
        }
        out.push_str(&format!("Final answer: {}", self.final_answer));
        out
    }
}

/// Try to solve `text` as arithmetic.
///
/// Returns `None` when no expression can be extracted (the caller should
/// fall through to the LLM solver); returns a textual-fallback result when
/// an expression was found but could not be evaluated.
pub fn solve_arithmetic(text: &str) -> Option<EvaluationResult> {
    let expression = extract_expression(text)?;

    match evaluate(&expression) {
        Ok(answer) => Some(EvaluationResult {
            steps: vec![
                format!("Detected the arithmetic expression: {}", expression),
                format!("Computed {} = {}", expression, answer),
            ],
            final_answer: answer.to_string(),
        }),
        Err(err) => Some(EvaluationResult {
            steps: vec![
                format!("Detected the arithmetic expression: {}", expression),
                format!("It could not be evaluated ({})", err),
            ],
            final_answer: "No numeric answer could be determined.".to_string(),
        }),
    }
}
