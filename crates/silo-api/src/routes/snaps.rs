//! Package search and info endpoints.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use silo_core::channel;
use silo_core::{SearchResult, SearchResults};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v2/snaps/find", get(find))
        .route("/v2/snaps/info/:name", get(info))
}

#[derive(Debug, Deserialize)]
struct SnapQuery {
    q: Option<String>,
    channel: Option<String>,
}

/// GET /v2/snaps/find?q=&channel=
///
/// `q` of `*` or absent matches every package; otherwise exact name match.
/// A missing channel defaults to `stable`.
async fn find(State(state): State<AppState>, Query(params): Query<SnapQuery>) -> Json<SearchResults> {
    let channel = channel::normalize(params.channel.as_deref().unwrap_or_default());
    let query = params.q.as_deref().unwrap_or_default();
    Json(state.cache.find(channel, query))
}

/// GET /v2/snaps/info/{name}?channel=
async fn info(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<SnapQuery>,
) -> Result<Json<SearchResult>, ApiError> {
    let channel = channel::normalize(params.channel.as_deref().unwrap_or_default());
    let mut results = state.cache.find(channel, &name);
    match results.results.pop() {
        Some(result) => Ok(Json(result)),
        None => Err(ApiError::NotFound(format!(
            "snap {name} not found on channel {channel}"
        ))),
    }
}
