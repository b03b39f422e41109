//! Assertion serving endpoint.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use silo_assert::AssertionKind;

use crate::error::ApiError;
use crate::state::AppState;

/// Content type clients expect for assertion documents.
pub const ASSERTION_CONTENT_TYPE: &str = "application/x.ubuntu.assertion";

pub fn router() -> Router<AppState> {
    Router::new().route("/v2/assertions/:assert_type/*key", get(assertion))
}

/// GET /v2/assertions/{type}/{key...}
///
/// The remainder of the path after the type is the primary key, with `/`
/// separating its components.
async fn assertion(
    State(state): State<AppState>,
    Path((assert_type, key)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = AssertionKind::from_wire(&assert_type)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown assertion type {assert_type:?}")))?;
    let primary_key: Vec<String> = key.split('/').map(str::to_string).collect();

    let asrt = state.issuer.issue(kind, &primary_key)?;
    Ok((
        [(header::CONTENT_TYPE, ASSERTION_CONTENT_TYPE)],
        asrt.text().to_string(),
    ))
}
