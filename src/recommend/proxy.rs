use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::server::AppState;

const QUERY_PATH: &str = "/api/recommendations/query";
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// `POST /api/recommendation-query`
///
/// Forwards the JSON body to the recommendation backend and relays its
/// answer untouched. The request is never retried here; the backend's side
/// effects are unknown to this layer.
pub async fn recommendation_query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    relay_query(&state, &body).await.map_err(|e| {
        warn!(error = %e, "recommendation proxy failed");
        e
    })
}

pub async fn relay_query(state: &AppState, body: &[u8]) -> Result<Response, ApiError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::Unexpected(format!("Invalid JSON body: {}", e)))?;

    let config = &state.config.recommendations;
    let url = format!("{}{}", config.base_url.trim_end_matches('/'), QUERY_PATH);
    debug!(url = %url, "forwarding recommendation query");

    let resp = state
        .http
        .post(&url)
        .json(&payload)
        .header(CACHE_CONTROL, "no-store")
        .header(PRAGMA, "no-cache")
        .timeout(config.timeout())
        .send()
        .await?;

    let status = StatusCode::from_u16(resp.status().as_u16())
        .map_err(|e| ApiError::Unexpected(e.to_string()))?;
    // Copied as bytes: the backend's declared type may not be visible ASCII.
    let content_type = match resp.headers().get(CONTENT_TYPE) {
        Some(value) => HeaderValue::from_bytes(value.as_bytes())
            .map_err(|e| ApiError::Unexpected(e.to_string()))?,
        None => HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
    };
    let bytes = resp.bytes().await?;

    debug!(status = status.as_u16(), length = bytes.len(), "recommendation backend replied");

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Unexpected(e.to_string()))
}
