//! Text embedding generation.
//!
//! The pipeline depends on the [`EmbeddingClient`] trait rather than a concrete
//! client so that tests can substitute fakes; [`openai::OpenAiClient`] is the
//! production implementation.

pub mod openai;

use crate::Result;

/// Maps a text string to a fixed-length embedding vector.
pub trait EmbeddingClient {
    /// Embed a single text. One network call, no retries; transient failures
    /// surface as [`crate::SearchError::Embedding`].
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
