//! Nearest-neighbor index access.
//!
//! [`VectorIndex`] is the seam the pipeline searches through; the production
//! implementation is [`pinecone::PineconeIndex`]. The index is treated as an
//! opaque store: it returns matches in its own score-descending order, and this
//! crate never re-sorts them.

pub mod pinecone;

use serde::{Deserialize, Serialize};

use crate::Result;

/// A single nearest-neighbor result as returned by the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// Paper metadata stored alongside each vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: String,
}

/// A stored index entry, as returned by a fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    #[serde(default)]
    pub values: Vec<f32>,
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// Nearest-neighbor store supporting query-by-vector, query-by-id, and
/// fetch-by-id. All calls are single-attempt and blocking; failures surface as
/// [`crate::SearchError::Index`].
pub trait VectorIndex {
    /// Top-k matches for an arbitrary vector, with metadata, score-descending.
    fn query_by_vector(&self, vector: &[f32], k: usize) -> Result<Vec<RawMatch>>;

    /// Top-k matches for the vector already stored under `id`.
    fn query_by_id(&self, id: &str, k: usize) -> Result<Vec<RawMatch>>;

    /// The stored record for `id`, or `None` when the index does not hold it.
    fn fetch_by_id(&self, id: &str) -> Result<Option<StoredRecord>>;
}
