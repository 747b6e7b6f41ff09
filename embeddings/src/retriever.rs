//! The embedding provider used by the conversation agent.
//!
//! Embeds text through a live backend or the deterministic mock, and looks
//! up similar passages when a vector store is configured.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{BackendMode, EmbeddingConfig};
use crate::error::{EmbeddingError, Result, RetrievalError};
use crate::mock::mock_embedding;
use crate::pgvector::PgVectorStore;
use crate::provider::{EmbeddingBackend, EmbeddingRequest, OpenAIProvider};
use crate::search::VectorSearchBackend;
use crate::{DEFAULT_DIMENSION, DEFAULT_SEARCH_LIMIT, Embedding};

/// How query text becomes a vector. Fixed when the provider is built.
#[derive(Clone)]
pub enum Embedder {
    /// Delegate to an external backend with a named model.
    Live {
        backend: Arc<dyn EmbeddingBackend>,
        model: String,
    },
    /// Hash the text locally.
    Mock { dimension: usize },
}

impl Embedder {
    /// Live embedder using the backend's default model.
    pub fn live(backend: Arc<dyn EmbeddingBackend>) -> Self {
        let model = backend.default_model().to_string();
        Embedder::Live { backend, model }
    }

    /// Mock embedder producing vectors of the default dimension.
    pub fn mock() -> Self {
        Embedder::Mock {
            dimension: DEFAULT_DIMENSION,
        }
    }

    pub fn mode(&self) -> BackendMode {
        match self {
            Embedder::Live { .. } => BackendMode::Live,
            Embedder::Mock { .. } => BackendMode::Mock,
        }
    }
}

/// Produces query embeddings and retrieves similar passages.
#[derive(Clone)]
pub struct EmbeddingProvider {
    embedder: Embedder,
    vector_search: Option<Arc<dyn VectorSearchBackend>>,
}

impl EmbeddingProvider {
    /// Create a provider from an embedder and an optional vector store.
    pub fn new(embedder: Embedder, vector_search: Option<Arc<dyn VectorSearchBackend>>) -> Self {
        Self {
            embedder,
            vector_search,
        }
    }

    /// Mock embeddings and no vector store.
    pub fn mock() -> Self {
        Self::new(Embedder::mock(), None)
    }

    /// Attach a vector store.
    pub fn with_vector_search(mut self, backend: Arc<dyn VectorSearchBackend>) -> Self {
        self.vector_search = Some(backend);
        self
    }

    pub fn mode(&self) -> BackendMode {
        self.embedder.mode()
    }

    pub fn has_vector_search(&self) -> bool {
        self.vector_search.is_some()
    }

    /// Embed `text`.
    ///
    /// In mock mode this is a pure function of `text` and never fails. In
    /// live mode the backend's first vector is returned as-is and backend
    /// errors are propagated without retrying.
    pub async fn embed(&self, text: &str) -> Result<Embedding> {
        match &self.embedder {
            Embedder::Mock { dimension } => Ok(mock_embedding(text, *dimension)),
            Embedder::Live { backend, model } => {
                let request = EmbeddingRequest::new(text).with_model(model.as_str());
                let response = backend.embed(request).await?;
                Ok(response.embedding)
            }
        }
    }

    /// Return the text of up to `limit` passages similar to `text`, in the
    /// order the vector store ranked them.
    ///
    /// Without a vector store this returns an empty list.
    pub async fn search_similar(
        &self,
        text: &str,
        limit: usize,
    ) -> std::result::Result<Vec<String>, RetrievalError> {
        let Some(vector_search) = &self.vector_search else {
            debug!("No vector store configured, skipping similarity search");
            return Ok(Vec::new());
        };

        let embedding = self.embed(text).await?;
        let hits = vector_search.search(&embedding, limit).await?;

        debug!(
            "{} returned {} hits (limit {limit})",
            vector_search.name(),
            hits.len()
        );

        Ok(hits.into_iter().map(|hit| hit.text).collect())
    }

    /// [`EmbeddingProvider::search_similar`] with [`DEFAULT_SEARCH_LIMIT`].
    pub async fn search_similar_default(
        &self,
        text: &str,
    ) -> std::result::Result<Vec<String>, RetrievalError> {
        self.search_similar(text, DEFAULT_SEARCH_LIMIT).await
    }
}

/// Build the provider described by `config`.
///
/// Live mode wires an [`OpenAIProvider`]; a configured vector service URL
/// wires a lazily connected [`PgVectorStore`].
pub fn create_embedding_provider(config: &EmbeddingConfig) -> Result<EmbeddingProvider> {
    let embedder = match config.mode() {
        BackendMode::Live => {
            let backend = OpenAIProvider::from_config(config);
            Embedder::Live {
                backend: Arc::new(backend),
                model: config.model.clone(),
            }
        }
        BackendMode::Mock => Embedder::Mock {
            dimension: config.dimension,
        },
    };

    let vector_search: Option<Arc<dyn VectorSearchBackend>> = match &config.vector_service_url {
        Some(url) => {
            let store = PgVectorStore::connect_lazy(url, config.vector_table.as_str())
                .map_err(|e| EmbeddingError::Config(format!("vector store: {e}")))?;
            Some(Arc::new(store))
        }
        None => None,
    };

    info!(
        "Embedding provider ready (mode: {}, vector search: {})",
        embedder.mode(),
        vector_search.is_some()
    );

    Ok(EmbeddingProvider::new(embedder, vector_search))
}
