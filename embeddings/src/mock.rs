//! Deterministic embeddings for running without an API key.

use sha2::{Digest, Sha256};

use crate::Embedding;

/// Build a pseudo-embedding from the SHA-256 digest of `text`.
///
/// Every digest byte is scaled into `[0, 1]` and the 32-value sequence is
/// repeated until exactly `dimension` values have been produced. The result
/// depends only on the UTF-8 bytes of `text` and on `dimension`.
pub fn mock_embedding(text: &str, dimension: usize) -> Embedding {
    let digest = Sha256::digest(text.as_bytes());

    digest
        .iter()
        .cycle()
        .take(dimension)
        .map(|&byte| f32::from(byte) / 255.0)
        .collect()
}
