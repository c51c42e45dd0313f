//! HTTP route handlers.

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{self, INVALID_LIMIT, INVALID_PAGE};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::Uri,
};
use chrono::{SecondsFormat, Utc};
use comics_core::{CacheStats, Comic, SearchResult, StatsSnapshot};
use serde::{Deserialize, Serialize};

/// Raw search query string; validated by hand so every failure gets its
/// own message.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
}

pub async fn latest(State(state): State<AppState>) -> Result<Json<Comic>, ApiError> {
    let comic = state.service.get_latest().await?;
    Ok(Json(Comic::clone(&comic)))
}

pub async fn random(State(state): State<AppState>) -> Result<Json<Comic>, ApiError> {
    let comic = state.service.get_random().await?;
    Ok(Json(Comic::clone(&comic)))
}

pub async fn search(
    State(state): State<AppState>, params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError::MalformedQuery(rejection.body_text()))?;
    let query = validation::validate_query(params.q.as_deref()).map_err(ApiError::Validation)?;
    let page = validation::parse_optional(params.page.as_deref(), INVALID_PAGE, validation::validate_page)
        .map_err(ApiError::Validation)?;
    let limit = validation::parse_optional(params.limit.as_deref(), INVALID_LIMIT, validation::validate_limit)
        .map_err(ApiError::Validation)?;

    let result = state.service.search(&query, page, limit).await?;
    Ok(Json(result))
}

pub async fn by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Result<Json<Comic>, ApiError> {
    let id = validation::parse_id(&raw).map_err(ApiError::Validation)?;
    let comic = state.service.get_by_id(id).await?;
    Ok(Json(Comic::clone(&comic)))
}

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.stats.uptime_secs(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.stats.snapshot())
}

pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.service.cache().stats())
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::EndpointNotFound(uri.path().to_string())
}
