//! Question solving.
//!
//! Arithmetic-looking questions are answered locally by the sandboxed
//! evaluator — no provider call, no tokens spent. Everything else goes to
//! the exam-solver prompt.

use tracing::debug;

use crate::error::Result;
use crate::generate::prompts::{solver_prompt, SOLVER_SYSTEM};
use crate::invoker::{GenerationRequest, ResilientInvoker};
use crate::solve::solve_arithmetic;

/// Solve a question, preferring the local arithmetic pipeline.
pub async fn solve_question(invoker: &ResilientInvoker, question: &str) -> Result<String> {
    if let Some(result) = solve_arithmetic(question) {
        debug!("question solved by the arithmetic pipeline");
        return Ok(result.render());
    }

    let request = GenerationRequest::new(SOLVER_SYSTEM, solver_prompt(question));
    invoker.invoke(&request).await.into_text()
}
