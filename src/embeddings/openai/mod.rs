
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::config::OpenAiConfig;
use crate::embeddings::EmbeddingClient;
use crate::{Result, SearchError};

const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// Client for the OpenAI embeddings API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: Url,
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl OpenAiClient {
    #[inline]
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SearchError::Config(format!("Invalid OpenAI base URL: {}", e)))?;
        let api_key = config
            .resolved_api_key()
            .ok_or_else(|| SearchError::Config("OpenAI API key is not configured".to_string()))?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Ok(Self {
            base_url,
            api_key,
            model: config.model.clone(),
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

    fn request_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let url = self
            .base_url
            .join(EMBEDDINGS_PATH)
            .map_err(|e| SearchError::Config(format!("Failed to build embeddings URL: {}", e)))?;

        let request = EmbeddingRequest {
            input: text,
            model: &self.model,
        };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| SearchError::Embedding(format!("Failed to serialize request: {}", e)))?;

        debug!(
            "Requesting embedding from {} (model {}, input length {})",
            url,
            self.model,
            text.len()
        );

        // Single attempt; failures propagate to the pipeline boundary.
        let response_text = self
            .agent
            .post(url.as_str())
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send(&request_json)
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| {
                error!("Embedding request to OpenAI failed: {}", e);
                SearchError::Embedding(e.to_string())
            })?;

        let response: EmbeddingResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse OpenAI embedding response: {}", e);
            SearchError::Embedding(format!("Malformed response: {}", e))
        })?;

        let embedding = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                error!("OpenAI embedding response contained no data entries");
                SearchError::Embedding("Empty response".to_string())
            })?;

        debug!("Received embedding with {} dimensions", embedding.len());
        Ok(embedding)
    }
}

impl EmbeddingClient for OpenAiClient {
    #[inline]
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.request_embedding(text)
    }
}
