use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Encore API",
        version = "0.1.0",
        description = "Retrieval-augmented search over NYC music events.",
    ),
    paths(handlers::search, handlers::health_check),
    components(schemas(
        dto::SearchRequest,
        dto::SearchResponse,
        dto::HealthResponse,
        dto::EmbeddingsStatus,
        dto::LlmStatus,
        models::EventMetadata,
        models::Borough,
    )),
    tags(
        (name = "search", description = "Query embedding, retrieval, and summarization"),
        (name = "health", description = "Service status"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
