//! `POST /check-plagiarism`: compare two uploaded files.
//!
//! Expects a multipart form with fields `file1` and `file2`. Optional query
//! parameters `lang` (grammar name) and `k` (shingle width) override the
//! server defaults for one request.

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use serde::Deserialize;
use sleuth_core::report::ComparisonReport;
use sleuth_detect::Comparator;
use sleuth_parser::Language;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct CompareParams {
    pub lang: Option<String>,
    pub k: Option<usize>,
}

pub async fn check_plagiarism(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CompareParams>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<ComparisonReport>> {
    let Query(params) = params.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let mut multipart = multipart.map_err(|e| ServerError::BadRequest(e.body_text()))?;

    let language = match params.lang.as_deref() {
        Some(name) => {
            Language::from_name(name).ok_or_else(|| ServerError::UnknownLanguage(name.into()))?
        }
        None => state.default_language,
    };
    let mut detection = state.detection.clone();
    if let Some(k) = params.k {
        detection.shingle_width = k;
    }
    detection
        .validate()
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let limit = state.server.max_upload_bytes;
    let mut code1 = None;
    let mut code2 = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::from_multipart(&e, limit))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let slot = match name.as_str() {
            "file1" => &mut code1,
            "file2" => &mut code2,
            _ => continue,
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::from_multipart(&e, limit))?;
        let text = String::from_utf8(bytes.to_vec()).map_err(|e| ServerError::Decode {
            field: name,
            reason: e.to_string(),
        })?;
        *slot = Some(text);
    }
    let code1 = code1.ok_or(ServerError::MissingFile("file1"))?;
    let code2 = code2.ok_or(ServerError::MissingFile("file2"))?;

    tracing::info!(
        language = %language,
        k = detection.shingle_width,
        bytes1 = code1.len(),
        bytes2 = code2.len(),
        "checking plagiarism"
    );

    // CPU-bound: keep it off the async workers.
    let report = tokio::task::spawn_blocking(move || {
        Comparator::new(language, &detection).compare(&code1, &code2)
    })
    .await?;

    tracing::info!(
        hash = report.hash_similarity,
        ast = report.ast_similarity,
        verdict = %report.verdict,
        "plagiarism check finished"
    );
    Ok(Json(report))
}
