//! Chat completion backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ragchat_embeddings::EmbeddingConfig;
use ragchat_embeddings::config::DEFAULT_BASE_URL;

use crate::error::CompletionError;
use crate::transcript::Turn;

/// Response of a chat completion call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub choices: Vec<ChatChoice>,
}

impl ChatCompletion {
    /// A response holding a single choice with the given content.
    pub fn single(content: impl Into<String>) -> Self {
        Self {
            choices: vec![ChatChoice {
                message: ChatMessage {
                    content: Some(content.into()),
                },
            }],
        }
    }

    /// Content of the first choice. A `null` content reads as empty.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub content: Option<String>,
}

/// An external service that continues a transcript.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Send the whole transcript and return the backend's choices.
    async fn create_completion(
        &self,
        model: &str,
        transcript: &[Turn],
    ) -> Result<ChatCompletion, CompletionError>;
}

/// OpenAI chat completions client.
pub struct OpenAIChatClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAIChatClient {
    /// Create a client for the public OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client sharing the embedding configuration's key and base URL.
    ///
    /// Returns `None` when no key is configured.
    pub fn from_config(config: &EmbeddingConfig) -> Option<Self> {
        config
            .api_key
            .as_ref()
            .map(|key| Self::new(key.as_str()).with_base_url(config.base_url.as_str()))
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
}

#[async_trait]
impl CompletionBackend for OpenAIChatClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn create_completion(
        &self,
        model: &str,
        transcript: &[Turn],
    ) -> Result<ChatCompletion, CompletionError> {
        debug!(
            "Requesting chat completion with model {model} ({} messages)",
            transcript.len()
        );

        let body = ChatRequest {
            model,
            messages: transcript,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(CompletionError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CompletionError::ApiRequest(format!(
                "OpenAI error {status}: {text}"
            )));
        }

        let completion: ChatCompletion = response.json().await?;
        info!("Received {} completion choices", completion.choices.len());

        Ok(completion)
    }
}
