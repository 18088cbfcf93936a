//! API route handlers
//!
//! - `health`: liveness check
//! - `plagiarism`: the two-file upload comparison

pub mod health;
pub mod plagiarism;

use crate::error::ServerError;
use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

/// API version and base info (GET /).
pub async fn api_info() -> impl IntoResponse {
    Json(json!({
        "name": "code-sleuth",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/check-plagiarism", "/health"]
    }))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
