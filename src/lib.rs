use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Maximum length, in characters, of a free-text query.
pub const MAX_QUERY_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Query exceeds {MAX_QUERY_CHARS} characters")]
    QueryTooLong,

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Abstract fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SearchError {
    /// The message shown to the user when this error ends a search.
    ///
    /// The first three strings are part of the response contract; the
    /// underlying causes are logged but never surfaced.
    #[inline]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::QueryTooLong => "Sorry! The length of your query cannot exceed 200 characters.",
            Self::Embedding(_) => "OpenAI not responding. Try again in a few minutes.",
            Self::Index(_) => "Pinecone not responding. Try again in a few minutes.",
            Self::Fetch(_) => "Could not read the abstract from that arXiv page.",
            Self::Config(_) | Self::Io(_) => {
                "Something went wrong while searching. Try again in a few minutes."
            }
        }
    }
}

pub mod commands;
pub mod config;
pub mod embeddings;
pub mod fetcher;
pub mod index;
pub mod search;
