//! Configuration for the conversation agent.

use serde::{Deserialize, Serialize};

use ragchat_embeddings::{BackendMode, EmbeddingConfig};

/// Chat model used when none is configured.
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

/// System prompt every transcript starts with.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
Answer the user's question clearly and concisely. \
Messages starting with \"retrieved context:\" contain passages looked up for the \
preceding question; use them when they are relevant and say so when they do not \
contain the answer.";

pub const ENV_COMPLETION_MODEL: &str = "RAGCHAT_COMPLETION_MODEL";
pub const ENV_SYSTEM_PROMPT: &str = "RAGCHAT_SYSTEM_PROMPT";

/// Configuration for the conversation agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Embedding provider and vector store configuration.
    pub embedding: EmbeddingConfig,

    /// Model used for chat completions.
    pub completion_model: String,

    /// System prompt placed at the start of the transcript.
    pub system_prompt: String,
}

impl AgentConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            completion_model: get(ENV_COMPLETION_MODEL)
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            system_prompt: get(ENV_SYSTEM_PROMPT)
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            embedding: EmbeddingConfig::from_lookup(lookup),
        }
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Set the completion model.
    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = model.into();
        self
    }

    /// Set the system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Live or mock, decided by the API key alone.
    pub fn mode(&self) -> BackendMode {
        self.embedding.mode()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            embedding: EmbeddingConfig::default(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::from_lookup(|_| None);

        assert_eq!(config.completion_model, "gpt-4o-mini");
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(config.mode(), BackendMode::Mock);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = AgentConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("sk-live".to_string()),
            ENV_COMPLETION_MODEL => Some("gpt-4o".to_string()),
            ENV_SYSTEM_PROMPT => Some("Answer in French.".to_string()),
            _ => None,
        });

        assert_eq!(config.mode(), BackendMode::Live);
        assert_eq!(config.completion_model, "gpt-4o");
        assert_eq!(config.system_prompt, "Answer in French.");
    }
}
