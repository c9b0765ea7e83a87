//! API route configuration.

use crate::api::handlers::{shorten_handler, status_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public API routes.
///
/// # Endpoints
///
/// - `POST /shorten`         - Issue a short link
/// - `POST /v1/api/shorten`  - Same, under the versioned prefix
/// - `GET  /api`             - Plain-text liveness message
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/v1/api/shorten", post(shorten_handler))
        .route("/api", get(status_handler))
}
