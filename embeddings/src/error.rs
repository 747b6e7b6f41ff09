//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors raised while turning text into an embedding.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Provider not configured.
    #[error("embedding provider not configured")]
    ProviderNotConfigured,

    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded.
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a vector search backend.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row came back without the expected columns.
    #[error("invalid search hit: {0}")]
    InvalidHit(String),

    /// Any other backend failure.
    #[error("search backend error: {0}")]
    Backend(String),
}

/// Errors from [`crate::EmbeddingProvider::search_similar`], which embeds
/// first and then searches.
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// Embedding the query failed.
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The similarity search itself failed.
    #[error("similarity search failed: {0}")]
    Search(#[from] SearchError),
}
