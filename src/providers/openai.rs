//! OpenAI-style chat-completions provider.
//!
//! Submits a chat request with separate system and user role messages.
//! Vision calls attach the image as a data-URI `image_url` content part,
//! the multipart format OpenAI-compatible endpoints accept.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::providers::{error_for_status, snippet};
use crate::traits::{ImageData, LlmProvider};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Low temperature: study answers should be stable, not creative.
const TEMPERATURE: f32 = 0.2;

/// OpenAI-style provider over the chat-completions endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: Content,
}

/// String for plain text, array of parts when an image rides along.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Content {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

// ============================================================================
// Implementation
// ============================================================================

impl OpenAiProvider {
    /// Create a provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENAI_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at an OpenAI-compatible endpoint (useful for test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send(&self, messages: Vec<Message>) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages,
        };
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %self.model, %url, "openai chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, "openai chat response");

        if !status.is_success() {
            return Err(error_for_status("openai", status, &body));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Malformed(format!(
                "unparseable openai response: {} | body: {}",
                e,
                snippet(&body)
            ))
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                ProviderError::Malformed("openai response held no choices".to_string())
            })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.send(vec![
            Message {
                role: "system",
                content: Content::Text(system.to_string()),
            },
            Message {
                role: "user",
                content: Content::Text(user.to_string()),
            },
        ])
        .await
    }

    async fn generate_with_image(
        &self,
        system: &str,
        user: &str,
        image: &ImageData,
    ) -> Result<String> {
        self.send(vec![
            Message {
                role: "system",
                content: Content::Text(system.to_string()),
            },
            Message {
                role: "user",
                content: Content::Parts(vec![
                    ContentPart::Text {
                        text: user.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.to_data_uri(),
                        },
                    },
                ]),
            },
        ])
        .await
    }

    fn supports_vision(&self) -> bool {
        true
    }
}
