//! Internal refresh trigger.
//!
//! Mounted only on the loopback listener; a release pipeline calls this
//! after publishing so new versions appear without waiting for the next
//! timed refresh.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/refresh", post(refresh))
}

/// POST /refresh — run a full refresh pass now.
async fn refresh(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state
        .cache
        .refresh()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;
    Ok(StatusCode::OK)
}
