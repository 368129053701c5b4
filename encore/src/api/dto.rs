//! Wire DTOs for the search API.

use serde::{Deserialize, Serialize};

use crate::models::EventMetadata;
use crate::services::SearchOutcome;

/// Request body for `POST /api/search`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SearchRequest {
    /// Free-text query, e.g. "jazz in Brooklyn this spring".
    pub query: String,
}

/// Response body for `POST /api/search`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// The model's curated summary. Empty when the model output carried no
    /// usable `Response` section.
    pub response: String,
    /// Retrieved events cited by the summary, in retrieval order.
    pub referenced_events: Vec<EventMetadata>,
    /// Retrieved events the summary did not cite.
    pub more_events: Vec<EventMetadata>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            response: outcome.summary,
            referenced_events: outcome.referenced_events,
            more_events: outcome.more_events,
        }
    }
}

/// Response body for `GET /api/health`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub embeddings: EmbeddingsStatus,
    pub llm: LlmStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct EmbeddingsStatus {
    pub model: String,
    pub dimensions: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LlmStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
