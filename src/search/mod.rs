//! The query-to-ranked-result pipeline.
//!
//! A raw query string is classified ([`Query`]), resolved to a search key
//! ([`SearchPipeline::resolve`]), ranked against the index ([`ranker`]),
//! aggregated by author ([`authors`]), and assembled into the outward payload
//! ([`payload::ResultPayload`]). Every error is converted to an error payload
//! at [`SearchPipeline::run`]; nothing propagates past it.


pub mod authors;
pub mod payload;
pub mod ranker;

use tracing::{debug, error, info};
use url::Url;

use crate::embeddings::EmbeddingClient;
use crate::fetcher::AbstractFetcher;
use crate::index::VectorIndex;
use crate::{MAX_QUERY_CHARS, Result, SearchError};
use payload::{RESULT_LIMIT, ResultPayload};

/// A classified user query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// A paper URL; `arxiv_id` is the trailing path segment.
    Url { url: Url, arxiv_id: String },
    /// Free text to embed directly.
    Text(String),
}

impl Query {
    /// Classify raw input as a paper URL or free text. Anything that does not
    /// parse as an http(s) URL with a path is a text query.
    #[inline]
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(url) = Url::parse(trimmed) {
            if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() {
                if let Some(arxiv_id) = trailing_segment(&url) {
                    return Self::Url { url, arxiv_id };
                }
            }
        }
        Self::Text(trimmed.to_string())
    }
}

fn trailing_segment(url: &Url) -> Option<String> {
    url.path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(ToString::to_string)
}

/// The key a nearest-neighbor search runs on: exactly one of a fresh embedding
/// or the id of a vector the index already stores.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchKey {
    Vector(Vec<f32>),
    Id(String),
}

/// A resolved query: the search key plus the id to drop from the results, set
/// when the query was the source paper itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub key: SearchKey,
    pub exclude: Option<String>,
}

/// The pipeline entry point. Owns no state beyond handles to the external
/// collaborators, which are injected so tests can substitute fakes.
pub struct SearchPipeline<'a> {
    embeddings: &'a dyn EmbeddingClient,
    index: &'a dyn VectorIndex,
    fetcher: &'a dyn AbstractFetcher,
}

impl<'a> SearchPipeline<'a> {
    #[inline]
    pub fn new(
        embeddings: &'a dyn EmbeddingClient,
        index: &'a dyn VectorIndex,
        fetcher: &'a dyn AbstractFetcher,
    ) -> Self {
        Self {
            embeddings,
            index,
            fetcher,
        }
    }

    /// Run one search to completion. All errors become the `{"error": ...}`
    /// payload; the underlying causes are logged here and not surfaced.
    #[inline]
    pub fn run(&self, raw_query: &str) -> ResultPayload {
        match self.execute(raw_query) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Search failed: {}", e);
                ResultPayload::error(e.user_message())
            }
        }
    }

    fn execute(&self, raw_query: &str) -> Result<ResultPayload> {
        let query = Query::classify(raw_query);
        let resolved = self.resolve(&query)?;

        let mut matches = ranker::rank(
            self.index,
            ranker::TOP_K,
            &resolved.key,
            resolved.exclude.as_deref(),
        )?;

        info!("Search produced {} matches", matches.len());

        // Authors aggregate over the full match set; only the outward paper
        // list is truncated.
        let authors = authors::aggregate(&matches);
        matches.truncate(RESULT_LIMIT);

        Ok(ResultPayload::assemble(matches, authors))
    }

    /// Decide how to obtain the search key for a classified query.
    ///
    /// URL queries short-circuit to a query-by-id when the index already holds
    /// the paper's vector; otherwise the paper's abstract is fetched and
    /// embedded. Either way the source paper is excluded from its own results.
    /// Text queries over [`MAX_QUERY_CHARS`] characters are rejected before
    /// any external call.
    #[inline]
    pub fn resolve(&self, query: &Query) -> Result<Resolved> {
        match query {
            Query::Url { url, arxiv_id } => {
                debug!("Resolving URL query for paper {}", arxiv_id);

                if self.index.fetch_by_id(arxiv_id)?.is_some() {
                    debug!("Index already holds {}; searching by id", arxiv_id);
                    return Ok(Resolved {
                        key: SearchKey::Id(arxiv_id.clone()),
                        exclude: Some(arxiv_id.clone()),
                    });
                }

                debug!("Index does not hold {}; embedding its abstract", arxiv_id);
                let abstract_text = self.fetcher.fetch(url)?;
                let vector = self.embeddings.embed(&abstract_text)?;
                Ok(Resolved {
                    key: SearchKey::Vector(vector),
                    exclude: Some(arxiv_id.clone()),
                })
            }
            Query::Text(text) => {
                if text.chars().count() > MAX_QUERY_CHARS {
                    return Err(SearchError::QueryTooLong);
                }
                let vector = self.embeddings.embed(text)?;
                Ok(Resolved {
                    key: SearchKey::Vector(vector),
                    exclude: None,
                })
            }
        }
    }
}
