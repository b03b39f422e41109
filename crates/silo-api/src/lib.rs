//! # silo-api — HTTP Front End for the silo Package Mirror
//!
//! Two separate routers over one shared [`state::AppState`]:
//!
//! | Surface  | Route                              | Purpose                       |
//! |----------|------------------------------------|-------------------------------|
//! | public   | `GET /v2/snaps/find`               | search a channel snapshot     |
//! | public   | `GET /v2/snaps/info/{name}`        | single-package lookup         |
//! | public   | `GET /v2/assertions/{type}/{key}`  | signed assertion documents    |
//! | public   | `GET /health/liveness`             | liveness probe                |
//! | internal | `POST /refresh`                    | immediate full refresh pass   |
//!
//! The internal router is bound to a loopback listener only; it exists so a
//! release pipeline on the same host can force a refresh after publishing.

pub mod error;
pub mod routes;
pub mod state;

use axum::http::StatusCode;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the public router: snaps, assertions, health, request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::snaps::router())
        .merge(routes::assertions::router())
        .route("/health/liveness", axum::routing::get(liveness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Assemble the internal router. The caller is responsible for binding it
/// to a loopback address only.
pub fn internal_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::internal::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health/liveness — process is up and serving.
async fn liveness() -> StatusCode {
    StatusCode::OK
}
