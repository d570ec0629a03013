//! Abstract retrieval from arXiv paper pages.
//!
//! Used only when a URL query names a paper the index does not hold yet: the
//! abstract is scraped from the paper's page and embedded in place of a stored
//! vector.

#[cfg(test)]
mod tests;

use itertools::Itertools;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::{Result, SearchError};

const CONTENT_SELECTOR: &str = "#content-inner";
const ABSTRACT_SELECTOR: &str = ".abstract";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fetches the abstract text for a paper page.
pub trait AbstractFetcher {
    fn fetch(&self, url: &Url) -> Result<String>;
}

/// Scrapes abstracts from arXiv `/abs/` pages.
#[derive(Debug, Clone)]
pub struct ArxivAbstractFetcher {
    agent: ureq::Agent,
}

impl Default for ArxivAbstractFetcher {
    #[inline]
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }
}

impl ArxivAbstractFetcher {
    #[inline]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { agent }
    }
}

impl AbstractFetcher for ArxivAbstractFetcher {
    #[inline]
    fn fetch(&self, url: &Url) -> Result<String> {
        debug!("Fetching abstract page {}", url);

        let html = self
            .agent
            .get(url.as_str())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| {
                error!("Failed to fetch {}: {}", url, e);
                SearchError::Fetch(e.to_string())
            })?;

        extract_abstract(&html)
    }
}

/// Extract the abstract text from an arXiv abstract-page HTML document.
///
/// The abstract lives in a `.abstract` blockquote inside `#content-inner`.
/// Text nodes are joined and whitespace-collapsed; the leading "Abstract:"
/// descriptor stays in, matching what a text render of the node produces.
#[inline]
pub fn extract_abstract(html: &str) -> Result<String> {
    let content_selector = Selector::parse(CONTENT_SELECTOR)
        .map_err(|e| SearchError::Fetch(format!("Invalid selector: {}", e)))?;
    let abstract_selector = Selector::parse(ABSTRACT_SELECTOR)
        .map_err(|e| SearchError::Fetch(format!("Invalid selector: {}", e)))?;

    let document = Html::parse_document(html);

    let content = document
        .select(&content_selector)
        .next()
        .ok_or_else(|| SearchError::Fetch("Page has no content section".to_string()))?;

    let abstract_node = content
        .select(&abstract_selector)
        .next()
        .ok_or_else(|| SearchError::Fetch("Page has no abstract".to_string()))?;

    let text = abstract_node
        .text()
        .collect::<String>()
        .split_whitespace()
        .join(" ");

    if text.is_empty() {
        return Err(SearchError::Fetch("Abstract is empty".to_string()));
    }

    debug!("Extracted abstract ({} characters)", text.len());
    Ok(text)
}
