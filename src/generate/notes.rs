//! Structured note generation.

use crate::error::Result;
use crate::generate::prompts::{notes_prompt, NOTES_SYSTEM};
use crate::invoker::{GenerationRequest, ResilientInvoker};

/// Turn study material into structured, exam-ready notes.
pub async fn generate_notes(invoker: &ResilientInvoker, text: &str) -> Result<String> {
    let request = GenerationRequest::new(NOTES_SYSTEM, notes_prompt(text));
    invoker.invoke(&request).await.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;
    use std::sync::Arc;

    #[tokio::test]
    async fn notes_use_the_notes_persona() {
        let mock = Arc::new(MockProvider::new());
        mock.push_ok("# Heading\n- detail");

        let invoker = ResilientInvoker::new(mock.clone());
        let notes = generate_notes(&invoker, "newton's laws").await.unwrap();

        assert!(notes.starts_with("# Heading"));
        assert_eq!(mock.calls()[0].system, NOTES_SYSTEM);
    }
}
