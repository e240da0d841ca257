//! Embeddings — the text encoder and vector similarity collaborators.
//!
//! The ranker only sees the `Encoder` and `Similarity` traits. `AppState` holds
//! `Arc<dyn Encoder>` (default: `HttpEncoder`) and `Arc<dyn Similarity>`
//! (default: `CosineSimilarity`).

use async_trait::async_trait;
use thiserror::Error;

pub mod http;
pub mod similarity;

pub use http::HttpEncoder;
pub use similarity::{CosineSimilarity, Similarity, SimilarityError};

/// A fixed-length embedding produced by the encoder.
pub type Embedding = Vec<f32>;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Embedding at position {position} has index {index:?}")]
    BadIndex {
        position: usize,
        index: Option<usize>,
    },
}

/// Converts text into embeddings.
///
/// `encode_batch` must return one vector per input text, in input order.
/// Callers never pass an empty batch.
#[async_trait]
pub trait Encoder: Send + Sync {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EncoderError>;

    async fn encode(&self, text: &str) -> Result<Embedding, EncoderError> {
        let mut vectors = self.encode_batch(&[text.to_string()]).await?;
        if vectors.len() != 1 {
            return Err(EncoderError::CountMismatch {
                expected: 1,
                actual: vectors.len(),
            });
        }
        Ok(vectors.remove(0))
    }

    /// Model name reported by `/health`.
    fn model(&self) -> &str;
}
