//! Postgres + pgvector similarity search.
//!
//! Reads the table layout written by Timescale Vector clients:
//! `(id UUID, metadata JSONB, contents TEXT, embedding VECTOR(n))`.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::error::SearchError;
use crate::search::{SearchHit, VectorSearchBackend};

const MAX_CONNECTIONS: u32 = 4;

/// Vector store backed by a pgvector table.
#[derive(Clone, Debug)]
pub struct PgVectorStore {
    /// Connection pool to Postgres.
    pool: PgPool,

    /// Validated, possibly schema-qualified table name.
    table: String,
}

impl PgVectorStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, SearchError> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self { pool, table })
    }

    /// Create a store whose pool connects on first use.
    pub fn connect_lazy(url: &str, table: impl Into<String>) -> Result<Self, SearchError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(url)?;
        Self::new(pool, table)
    }

    /// Name of the searched table.
    pub fn table(&self) -> &str {
        &self.table
    }

    fn search_sql(&self) -> String {
        format!(
            "SELECT id::text AS id, metadata, contents, \
             (embedding <=> $1::vector)::float4 AS distance \
             FROM {} ORDER BY distance ASC LIMIT $2",
            self.table
        )
    }
}

#[async_trait]
impl VectorSearchBackend for PgVectorStore {
    fn name(&self) -> &str {
        "pgvector"
    }

    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(&self.search_sql())
            .bind(vector_literal(vector))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        let mut hits = Vec::with_capacity(rows.len());
        for row in rows {
            hits.push(hit_from_columns(
                row.try_get("id")?,
                row.try_get("contents")?,
                row.try_get("metadata")?,
                row.try_get("distance")?,
            )?);
        }

        debug!("pgvector search on {} returned {} hits", self.table, hits.len());
        Ok(hits)
    }
}

/// Build a hit from the columns of one result row. `contents` becomes the
/// hit text and must be present; a missing id is read as empty.
fn hit_from_columns(
    id: Option<String>,
    contents: Option<String>,
    metadata: Option<serde_json::Value>,
    distance: Option<f32>,
) -> Result<SearchHit, SearchError> {
    let id = id.unwrap_or_default();
    let text =
        contents.ok_or_else(|| SearchError::InvalidHit(format!("row {id} has no contents")))?;

    let mut hit = SearchHit::new(id, text);
    if let Some(distance) = distance {
        hit = hit.with_score(distance);
    }
    if let Some(metadata) = metadata {
        hit = hit.with_metadata(metadata);
    }
    Ok(hit)
}

/// Render a vector in pgvector's text input format, e.g. `[0.5,1,-2]`.
fn vector_literal(vector: &[f32]) -> String {
    let values: Vec<String> = vector.iter().map(f32::to_string).collect();
    format!("[{}]", values.join(","))
}

/// Accept `table` or `schema.table` made of plain identifier characters.
fn validate_table_name(name: &str) -> Result<(), SearchError> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = parts.len() <= 2
        && parts.iter().all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(SearchError::Backend(format!("invalid table name: {name:?}")))
    }
}
