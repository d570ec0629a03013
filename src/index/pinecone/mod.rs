
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::config::PineconeConfig;
use crate::index::{RawMatch, StoredRecord, VectorIndex};
use crate::{Result, SearchError};

const QUERY_PATH: &str = "/query";
const FETCH_PATH: &str = "/vectors/fetch";

/// Client for a Pinecone index over its REST API.
#[derive(Debug, Clone)]
pub struct PineconeIndex {
    base_url: Url,
    api_key: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector: Option<&'a [f32]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct FetchResponse {
    #[serde(default)]
    vectors: HashMap<String, StoredRecord>,
}

impl PineconeIndex {
    #[inline]
    pub fn new(config: &PineconeConfig) -> Result<Self> {
        if config.index_host.is_empty() {
            return Err(SearchError::Config(
                "Pinecone index host is not configured".to_string(),
            ));
        }
        let base_url = Url::parse(&config.index_host)
            .map_err(|e| SearchError::Config(format!("Invalid Pinecone index host: {}", e)))?;
        let api_key = config
            .resolved_api_key()
            .ok_or_else(|| SearchError::Config("Pinecone API key is not configured".to_string()))?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Ok(Self {
            base_url,
            api_key,
            agent,
        })
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        self
    }

    fn query(&self, request: &QueryRequest<'_>) -> Result<Vec<RawMatch>> {
        let url = self
            .base_url
            .join(QUERY_PATH)
            .map_err(|e| SearchError::Config(format!("Failed to build query URL: {}", e)))?;

        let request_json = serde_json::to_string(request)
            .map_err(|e| SearchError::Index(format!("Failed to serialize query: {}", e)))?;

        debug!("Querying index at {} (top_k {})", url, request.top_k);

        let response_text = self
            .agent
            .post(url.as_str())
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .send(&request_json)
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| {
                error!("Index query to Pinecone failed: {}", e);
                SearchError::Index(e.to_string())
            })?;

        let response: QueryResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Pinecone query response: {}", e);
            SearchError::Index(format!("Malformed response: {}", e))
        })?;

        debug!("Index returned {} matches", response.matches.len());
        Ok(response.matches)
    }
}

impl VectorIndex for PineconeIndex {
    #[inline]
    fn query_by_vector(&self, vector: &[f32], k: usize) -> Result<Vec<RawMatch>> {
        self.query(&QueryRequest {
            top_k: k,
            include_metadata: true,
            vector: Some(vector),
            id: None,
        })
    }

    #[inline]
    fn query_by_id(&self, id: &str, k: usize) -> Result<Vec<RawMatch>> {
        self.query(&QueryRequest {
            top_k: k,
            include_metadata: true,
            vector: None,
            id: Some(id),
        })
    }

    #[inline]
    fn fetch_by_id(&self, id: &str) -> Result<Option<StoredRecord>> {
        let mut url = self
            .base_url
            .join(FETCH_PATH)
            .map_err(|e| SearchError::Config(format!("Failed to build fetch URL: {}", e)))?;
        url.query_pairs_mut().append_pair("ids", id);

        debug!("Fetching stored record for id {}", id);

        let response_text = self
            .agent
            .get(url.as_str())
            .header("Api-Key", &self.api_key)
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| {
                error!("Fetch from Pinecone failed: {}", e);
                SearchError::Index(e.to_string())
            })?;

        let mut response: FetchResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Pinecone fetch response: {}", e);
            SearchError::Index(format!("Malformed response: {}", e))
        })?;

        Ok(response.vectors.remove(id))
    }
}
