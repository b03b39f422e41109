//! Shared application state.

use std::sync::Arc;

use silo_assert::Issuer;
use silo_index::IndexCache;

/// State shared by all request handlers.
///
/// Both fields are `Arc`s; cloning the state is cheap and every handler
/// sees the same cache and signing authority.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<IndexCache>,
    pub issuer: Arc<Issuer>,
}
