//! Error types for the conversation agent.

use ragchat_embeddings::{EmbeddingError, RetrievalError};
use thiserror::Error;

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors raised by a chat completion backend.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from the backend.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors that can occur while running a conversation.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Embedding the question or searching for context failed.
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    /// The completion backend failed.
    #[error("completion error: {0}")]
    Completion(#[from] CompletionError),

    /// Building the embedding provider failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
