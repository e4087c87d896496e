//! Text-generation providers

use crate::error::{ForgeError, ForgeResult};
use crate::prompt::{system_prompt, user_message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use specsmith_core::ForgeConfig;

/// API version header sent to the Messages endpoint
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Inputs for one generated spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// What the user wants to build
    pub description: String,
    /// Output of [`crate::gather_context`]
    pub context: String,
    /// `YYYY-MM-DD`
    pub today: String,
}

/// Produces SPEC.md text from a description
#[async_trait]
pub trait SpecGenerator: Send + Sync {
    /// Generate a document; the caller parses whatever comes back
    async fn generate(&self, request: &GenerationRequest) -> ForgeResult<String>;

    /// Model or backend name, for progress messages
    fn model(&self) -> &str;
}

/// Anthropic Messages API client
#[derive(Debug, Clone)]
pub struct AnthropicGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl AnthropicGenerator {
    /// Client using `api_key` and the configured model and endpoint
    #[must_use]
    pub fn new(api_key: impl Into<String>, config: &ForgeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            endpoint: config.endpoint.clone(),
        }
    }

    /// Key from `explicit`, else from the configured environment variable
    ///
    /// # Errors
    /// Returns `ForgeError::MissingApiKey` when neither is set.
    pub fn from_env(explicit: Option<String>, config: &ForgeConfig) -> ForgeResult<Self> {
        let key = explicit
            .or_else(|| std::env::var(&config.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ForgeError::MissingApiKey {
                var: config.api_key_env.clone(),
            })?;
        Ok(Self::new(key, config))
    }

    /// Override the model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn body(&self, request: &GenerationRequest) -> MessagesRequest {
        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: system_prompt(),
            messages: vec![Message {
                role: "user".to_string(),
                content: user_message(&request.description, &request.today, &request.context),
            }],
        }
    }
}

#[async_trait]
impl SpecGenerator for AnthropicGenerator {
    async fn generate(&self, request: &GenerationRequest) -> ForgeResult<String> {
        tracing::debug!(model = %self.model, context_len = request.context.len(), "requesting spec");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.body(request))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ForgeError::Api { status, body });
        }

        let parsed: MessagesResponse = response.json().await?;
        first_text(parsed)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

fn first_text(response: MessagesResponse) -> ForgeResult<String> {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or(ForgeError::EmptyResponse)
}
