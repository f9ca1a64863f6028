//! Process-wide provider configuration.
//!
//! Settings are read from the environment exactly once at startup and
//! carried in an explicit struct — injected into provider constructors,
//! never consulted again per call. Provider selection is likewise resolved
//! once: whichever provider has a key configured wins, OpenAI first.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` / `OPENAI_MODEL` (default `gpt-4o-mini`)
//! - `GEMINI_API_KEY` / `GEMINI_MODEL` (default `gemini-1.5-flash`)

use std::sync::Arc;

use tracing::info;

use crate::error::{ProviderError, Result};
use crate::providers::{GeminiProvider, OpenAiProvider};
use crate::traits::LlmProvider;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Which backend a deployment talks to. Static per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderIdentity {
    /// Chat-completions API with separate system/user roles.
    OpenAi,
    /// generateContent API with a fixed system instruction.
    Gemini,
}

/// Read-only provider settings, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub identity: ProviderIdentity,
    pub api_key: String,
    pub model: String,
}

impl ProviderSettings {
    /// Settings for an OpenAI-style deployment.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            identity: ProviderIdentity::OpenAi,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Settings for a Gemini-style deployment.
    pub fn gemini(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            identity: ProviderIdentity::Gemini,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Resolve settings from the environment.
    ///
    /// The first configured provider wins: `OPENAI_API_KEY`, then
    /// `GEMINI_API_KEY`. Neither set is a startup error, not a per-request
    /// one.
    pub fn from_env() -> Result<Self> {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                let model = std::env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string());
                return Ok(Self::openai(key, model));
            }
        }
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                let model = std::env::var("GEMINI_MODEL")
                    .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
                return Ok(Self::gemini(key, model));
            }
        }
        Err(ProviderError::Config(
            "missing API key: set OPENAI_API_KEY or GEMINI_API_KEY".to_string(),
        ))
    }

    /// Build the concrete provider client for these settings.
    pub fn build(&self) -> Arc<dyn LlmProvider> {
        info!(
            provider = ?self.identity,
            model = %self.model,
            "configuring LLM provider"
        );
        match self.identity {
            ProviderIdentity::OpenAi => Arc::new(
                OpenAiProvider::new(self.api_key.clone()).with_model(self.model.clone()),
            ),
            ProviderIdentity::Gemini => Arc::new(
                GeminiProvider::new(self.api_key.clone()).with_model(self.model.clone()),
            ),
        }
    }
}
