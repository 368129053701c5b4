use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::VectorStoreConfig;
use crate::error::{EncoreError, Result};
use crate::models::{EventMatch, EventMetadata, IndexStats, VectorRecord};

/// Nearest-neighbor store for event vectors: overwrite-by-id upserts and
/// top-K similarity queries against one named namespace.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;

    /// Up to `top_k` nearest entries, best match first. A malformed or
    /// empty upstream body normalizes to an empty list instead of a shape
    /// error.
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<EventMatch>>;

    async fn delete_all(&self) -> Result<()>;

    async fn stats(&self) -> Result<IndexStats>;
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
    namespace: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    id: String,
    #[serde(default)]
    score: f32,
    metadata: Option<EventMetadata>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    delete_all: bool,
    namespace: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    total_vector_count: Option<u64>,
    total_record_count: Option<u64>,
}

/// HTTP client for a Pinecone-style vector database data plane.
#[derive(Clone)]
pub struct VectorStoreClient {
    client: Client,
    config: VectorStoreConfig,
}

impl VectorStoreClient {
    pub fn new(config: &VectorStoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(ref api_key) = config.api_key {
            headers.insert(
                "Api-Key",
                HeaderValue::from_str(api_key).map_err(|e| {
                    EncoreError::VectorStore(format!("Invalid API key header: {e}"))
                })?,
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| EncoreError::VectorStore(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EncoreError::VectorStore(format!(
                "{path} returned {status}: {body}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl VectorIndex for VectorStoreClient {
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        let request = UpsertRequest {
            vectors: records,
            namespace: &self.config.namespace,
        };
        self.post_json("/vectors/upsert", &request).await?;
        Ok(())
    }

    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<EventMatch>> {
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            namespace: &self.config.namespace,
        };

        let response = self.post_json("/query", &request).await?;

        let body: QueryResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Invalid vector store response shape: {}", e);
                return Ok(Vec::new());
            }
        };

        Ok(body
            .matches
            .into_iter()
            .filter_map(|m| {
                let metadata = m.metadata?;
                Some(EventMatch {
                    id: m.id,
                    score: m.score,
                    metadata,
                })
            })
            .collect())
    }

    async fn delete_all(&self) -> Result<()> {
        let request = DeleteRequest {
            delete_all: true,
            namespace: &self.config.namespace,
        };
        self.post_json("/vectors/delete", &request).await?;
        Ok(())
    }

    async fn stats(&self) -> Result<IndexStats> {
        let response = self
            .post_json("/describe_index_stats", &serde_json::json!({}))
            .await?;

        let body: StatsResponse = response
            .json()
            .await
            .map_err(|e| EncoreError::VectorStore(format!("Failed to parse stats response: {e}")))?;

        Ok(IndexStats {
            vector_count: body
                .total_vector_count
                .or(body.total_record_count)
                .unwrap_or(0),
        })
    }
}
