//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`           - Short link redirect
//! - `GET  /health`           - Health check: link store
//! - `POST /shorten`          - Issue a short link
//! - `POST /v1/api/shorten`   - Issue a short link (versioned prefix)
//! - `GET  /api`              - Liveness text
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
///
/// Fixed routes take priority over the `/{code}` capture; the code generator
/// never issues codes that collide with them.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(api::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
