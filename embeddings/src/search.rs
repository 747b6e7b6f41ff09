//! Vector search backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// One passage returned by a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// ID of the matched passage.
    pub id: String,

    /// The passage text.
    pub text: String,

    /// Backend-specific score (a distance for pgvector).
    pub score: Option<f32>,

    /// Additional metadata.
    pub metadata: Option<serde_json::Value>,
}

impl SearchHit {
    /// Create a hit with no score or metadata.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score: None,
            metadata: None,
        }
    }

    /// Set the score.
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A nearest-neighbour index over stored passages.
#[async_trait]
pub trait VectorSearchBackend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Return at most `limit` hits closest to `vector`, best first.
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}
