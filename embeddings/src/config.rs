//! Configuration for embedding generation and similarity search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_DIMENSION, DEFAULT_EMBEDDING_MODEL};

/// Default base URL of the OpenAI-compatible API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default pgvector table holding the searchable passages.
pub const DEFAULT_VECTOR_TABLE: &str = "embeddings";

/// Placeholder API key that is treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "DUMMY";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_VECTOR_SERVICE_URL: &str = "TIMESCALE_SERVICE_URL";
pub const ENV_EMBEDDING_MODEL: &str = "RAGCHAT_EMBEDDING_MODEL";
pub const ENV_VECTOR_TABLE: &str = "RAGCHAT_VECTOR_TABLE";

/// Whether the live backends or the deterministic fallbacks are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Real embedding and completion APIs.
    Live,
    /// Hash-based embeddings and canned replies, no network access.
    Mock,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendMode::Live => f.write_str("live"),
            BackendMode::Mock => f.write_str("mock"),
        }
    }
}

/// Configuration for the embedding provider and the vector store.
#[derive(Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// API key for the embeddings service.
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,

    /// Model to use for embeddings.
    pub model: String,

    /// Length of the mock embeddings.
    pub dimension: usize,

    /// Postgres connection string of the vector store, if any.
    pub vector_service_url: Option<String>,

    /// Table searched in the vector store.
    pub vector_table: String,
}

impl EmbeddingConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: get(ENV_API_KEY),
            base_url: get(ENV_BASE_URL).unwrap_or(defaults.base_url),
            model: get(ENV_EMBEDDING_MODEL).unwrap_or(defaults.model),
            dimension: defaults.dimension,
            vector_service_url: get(ENV_VECTOR_SERVICE_URL),
            vector_table: get(ENV_VECTOR_TABLE).unwrap_or(defaults.vector_table),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the vector store connection string.
    pub fn with_vector_service_url(mut self, url: impl Into<String>) -> Self {
        self.vector_service_url = Some(url.into());
        self
    }

    /// Live mode needs a real API key; a missing key or the `DUMMY`
    /// placeholder selects mock mode.
    pub fn mode(&self) -> BackendMode {
        match self.api_key.as_deref() {
            Some(key) if key != PLACEHOLDER_API_KEY => BackendMode::Live,
            _ => BackendMode::Mock,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: DEFAULT_DIMENSION,
            vector_service_url: None,
            vector_table: DEFAULT_VECTOR_TABLE.to_string(),
        }
    }
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("dimension", &self.dimension)
            .field(
                "vector_service_url",
                &self.vector_service_url.as_ref().map(|_| "<redacted>"),
            )
            .field("vector_table", &self.vector_table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = EmbeddingConfig::from_lookup(lookup(&[]));

        assert_eq!(config.mode(), BackendMode::Mock);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "text-embedding-3-small");
        assert_eq!(config.dimension, 1536);
        assert_eq!(config.vector_service_url, None);
        assert_eq!(config.vector_table, "embeddings");
    }

    #[test]
    fn test_dummy_key_selects_mock_mode() {
        let config = EmbeddingConfig::from_lookup(lookup(&[(ENV_API_KEY, "DUMMY")]));
        assert_eq!(config.mode(), BackendMode::Mock);
    }

    #[test]
    fn test_empty_key_selects_mock_mode() {
        let config = EmbeddingConfig::from_lookup(lookup(&[(ENV_API_KEY, "  ")]));
        assert_eq!(config.api_key, None);
        assert_eq!(config.mode(), BackendMode::Mock);
    }

    #[test]
    fn test_real_key_selects_live_mode() {
        let config = EmbeddingConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "sk-test"),
            (ENV_VECTOR_SERVICE_URL, "postgres://localhost/vectors"),
            (ENV_VECTOR_TABLE, "docs"),
        ]));

        assert_eq!(config.mode(), BackendMode::Live);
        assert_eq!(
            config.vector_service_url.as_deref(),
            Some("postgres://localhost/vectors")
        );
        assert_eq!(config.vector_table, "docs");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = EmbeddingConfig::default()
            .with_api_key("sk-secret")
            .with_vector_service_url("postgres://user:pw@db/vectors");
        let debug = format!("{config:?}");

        assert!(!debug.contains("sk-secret"));
        assert!(!debug.contains("pw@db"));
    }
}
