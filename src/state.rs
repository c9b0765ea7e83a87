//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Human-readable name of the link store backend, reported by `/health`.
    pub store_backend: &'static str,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, store_backend: &'static str) -> Self {
        Self {
            link_service,
            store_backend,
        }
    }
}
