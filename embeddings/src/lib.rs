//! # Embeddings
//!
//! This crate turns query text into embedding vectors and looks up
//! semantically similar passages for the ragchat conversation agent.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert text to dense vectors through an
//!   OpenAI-compatible embeddings API
//! - **Mock Embeddings**: Deterministic SHA-256 vectors when no API key is set
//! - **Similarity Search**: Nearest-neighbour lookup against a pgvector table
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingConfig ──► EmbeddingProvider ──► Vec<String>          │
//! │                        │           │                            │
//! │                        ▼           ▼                            │
//! │          EmbeddingBackend    VectorSearchBackend                │
//! │          (OpenAI / mock)     (pgvector, optional)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod pgvector;
pub mod provider;
pub mod retriever;
pub mod search;

pub use config::{BackendMode, EmbeddingConfig};
pub use error::{EmbeddingError, Result, RetrievalError, SearchError};
pub use mock::mock_embedding;
pub use pgvector::PgVectorStore;
pub use provider::{EmbeddingBackend, EmbeddingRequest, EmbeddingResponse, OpenAIProvider};
pub use retriever::{Embedder, EmbeddingProvider, create_embedding_provider};
pub use search::{SearchHit, VectorSearchBackend};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 1536; // OpenAI text-embedding-3-small

/// Embedding model used when none is configured.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Number of passages returned by [`EmbeddingProvider::search_similar`] by default.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;
