use axum::extract::State;
use axum::Json;

use super::dto::{EmbeddingsStatus, HealthResponse, LlmStatus, SearchRequest, SearchResponse};
use super::AppState;
use crate::error::Result;

/// `POST /api/search`
///
/// Embeds the query, retrieves the nearest events, and returns the model's
/// summary plus the retrieved events partitioned by citation.
#[utoipa::path(
    post,
    path = "/api/search",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Summary and partitioned matches", body = SearchResponse),
        (status = 400, description = "Blank query"),
        (status = 503, description = "Language model not configured"),
        (status = 500, description = "Embedding or retrieval failure"),
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let outcome = state.search.search(&req.query).await?;
    Ok(Json(SearchResponse::from(outcome)))
}

/// `GET /api/health`
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let llm = if state.llm.is_available() {
        LlmStatus {
            status: "ok".to_string(),
            model: state.config.llm.as_ref().map(|c| c.model.clone()),
        }
    } else {
        LlmStatus {
            status: "unavailable".to_string(),
            model: None,
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        embeddings: EmbeddingsStatus {
            model: state.config.embeddings.model.clone(),
            dimensions: state.config.embeddings.dimensions,
        },
        llm,
    })
}
