
use serde::{Deserialize, Serialize};

use crate::index::RawMatch;

/// Maximum number of papers and author groups in a response.
pub const RESULT_LIMIT: usize = 10;

/// Round a similarity score to two decimals for display.
#[inline]
pub fn round_score(score: f32) -> f32 {
    (score * 100.0).round() / 100.0
}

/// A ranked paper, ready for serialization.
///
/// Fields are enumerated explicitly; the wire keys match the stored metadata
/// (`abstract` rather than `abstract_text`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub score: f32,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub year: i32,
    pub month: String,
    pub authors_parsed: Vec<String>,
}

impl MatchRecord {
    /// Build a record from a raw index match: round the score and derive the
    /// parsed author list (trimmed names split on commas, no normalization).
    #[inline]
    pub fn from_raw(raw: RawMatch) -> Self {
        let metadata = raw.metadata;
        let authors_parsed = metadata
            .authors
            .split(',')
            .map(|author| author.trim().to_string())
            .collect();

        Self {
            id: raw.id,
            score: round_score(raw.score),
            title: metadata.title,
            authors: metadata.authors,
            abstract_text: metadata.abstract_text,
            year: metadata.year,
            month: metadata.month,
            authors_parsed,
        }
    }
}

/// An author and the subset of the match set naming them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorGroup {
    pub author: String,
    pub papers: Vec<MatchRecord>,
    pub avg_score: f32,
}

/// The outward response: ranked papers plus ranked authors, or an error.
/// An error payload never carries partial results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Matches {
        papers: Vec<MatchRecord>,
        authors: Vec<AuthorGroup>,
    },
    Error {
        error: String,
    },
}

impl ResultPayload {
    /// Combine the truncated paper list and the aggregated author groups.
    /// Pure assembly; no further filtering happens here.
    #[inline]
    pub fn assemble(papers: Vec<MatchRecord>, authors: Vec<AuthorGroup>) -> Self {
        Self::Matches { papers, authors }
    }

    #[inline]
    pub fn error<S: Into<String>>(message: S) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    #[inline]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
