use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Ticketing API error: {0}")]
    Ticketing(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for EncoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            EncoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            EncoreError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            EncoreError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            EncoreError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            EncoreError::Embedding(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            EncoreError::VectorStore(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            EncoreError::Ticketing(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            EncoreError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            EncoreError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            EncoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "details": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, EncoreError>;
