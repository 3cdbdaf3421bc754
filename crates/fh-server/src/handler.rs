use axum::extract::{Path, Query, State};
use axum::response::Json;
use fh_catalog::{CategoryEntry, ContentKind, ContentSummary};
use fh_types::ContentId;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "fh-server",
        "version": env!("CARGO_PKG_VERSION"),
        "contents": state.catalog.all().len(),
    }))
}

pub async fn list_content(State(state): State<AppState>) -> Json<Vec<ContentSummary>> {
    Json(state.catalog.all())
}

pub async fn trending_content(State(state): State<AppState>) -> Json<Vec<ContentSummary>> {
    let trending = state.catalog.trending();
    debug!(count = trending.len(), "trending content");
    Json(trending)
}

pub async fn featured_content(State(state): State<AppState>) -> Json<Vec<ContentSummary>> {
    let featured = state.catalog.featured();
    debug!(count = featured.len(), "featured content");
    Json(featured)
}

/// Unknown types yield an empty list rather than an error.
pub async fn content_by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Json<Vec<ContentSummary>> {
    let list = kind
        .parse::<ContentKind>()
        .map(|k| state.catalog.by_type(k))
        .unwrap_or_default();
    Json(list)
}

pub async fn content_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<ContentSummary>> {
    state
        .catalog
        .by_id(&ContentId::new(id.as_str()))
        .map(Json)
        .ok_or(ServerError::ContentNotFound(id))
}

pub async fn content_categories(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<CategoryEntry>> {
    Json(state.catalog.categories_of(&ContentId::new(id)))
}

pub async fn category_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<CategoryEntry>> {
    state
        .catalog
        .category(&id)
        .map(Json)
        .ok_or(ServerError::CategoryNotFound(id))
}

pub async fn search_content(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ServerResult<Json<Vec<ContentSummary>>> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ServerError::MissingQuery)?;
    let hits = state.catalog.search(&query);
    debug!(query = %query, hits = hits.len(), "search");
    Ok(Json(hits))
}

pub async fn not_found() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
}
