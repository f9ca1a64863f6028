//! Study-material summarization.

use crate::error::Result;
use crate::generate::prompts::{summary_prompt, SUMMARY_SYSTEM};
use crate::invoker::{GenerationRequest, ResilientInvoker};

/// Summarize study material into exam-ready bullet points.
pub async fn summarize(invoker: &ResilientInvoker, text: &str) -> Result<String> {
    let request = GenerationRequest::new(SUMMARY_SYSTEM, summary_prompt(text));
    invoker.invoke(&request).await.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;
    use std::sync::Arc;

    #[tokio::test]
    async fn summarize_sends_material_to_provider() {
        let mock = Arc::new(MockProvider::new());
        mock.push_ok("- point one\n- point two");

        let invoker = ResilientInvoker::new(mock.clone());
        let summary = summarize(&invoker, "cell biology basics").await.unwrap();

        assert_eq!(summary, "- point one\n- point two");
        let calls = mock.calls();
        assert_eq!(calls[0].system, SUMMARY_SYSTEM);
        assert!(calls[0].user.contains("cell biology basics"));
    }
}
