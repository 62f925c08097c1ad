use axum::{
    extract::{Query, State},
    Json,
};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use tracing::{debug, warn};

use super::normalize::normalize_results;
use super::types::{NormalizedMovie, SearchRequest, SearchResponse};
use crate::config::{MetadataConfig, RAPIDAPI_KEY_ENV};
use crate::error::ApiError;
use crate::server::AppState;
use crate::util::QueryParams;

const SEARCH_PATH: &str = "/api/imdb/search";
const UPSTREAM_ERROR: &str = "Upstream error";

impl SearchRequest {
    pub fn from_params(params: &QueryParams, config: &MetadataConfig) -> Self {
        SearchRequest {
            query: params
                .get("q")
                .map(str::to_string)
                .unwrap_or_else(|| config.default_query.clone()),
            limit: params.get_count("take").unwrap_or(config.default_take),
        }
    }
}

/// `GET /api/metadata-search?q=<title>&take=<n>`
pub async fn metadata_search(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = SearchRequest::from_params(&params, &state.config.metadata);

    let movies = search_movies(&state, &request).await.map_err(|e| {
        warn!(query = %request.query, error = %e, "metadata search failed");
        e
    })?;

    debug!(query = %request.query, count = movies.len(), "metadata search");
    Ok(Json(SearchResponse { movies }))
}

pub async fn search_movies(
    state: &AppState,
    request: &SearchRequest,
) -> Result<Vec<NormalizedMovie>, ApiError> {
    let config = &state.config.metadata;
    let api_key = state
        .config
        .metadata_api_key()
        .ok_or(ApiError::MissingCredential(RAPIDAPI_KEY_ENV))?;

    let url = format!(
        "{}{}?query={}",
        config.base_url.trim_end_matches('/'),
        SEARCH_PATH,
        urlencoding::encode(&request.query)
    );
    debug!(url = %url, "querying metadata provider");

    let resp = state
        .http
        .get(&url)
        .header("x-rapidapi-key", api_key)
        .header("x-rapidapi-host", config.host.as_str())
        .header(CACHE_CONTROL, "no-store")
        .header(PRAGMA, "no-cache")
        .timeout(config.timeout())
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await?;
        warn!(status = status.as_u16(), "metadata provider returned an error");
        let message = if text.is_empty() {
            UPSTREAM_ERROR.to_string()
        } else {
            text
        };
        return Err(ApiError::Upstream(message));
    }

    let body = resp.bytes().await?;
    let data: Value = serde_json::from_slice(&body)?;

    Ok(normalize_results(&data, request.limit))
}
