//! Plain-text liveness endpoint.

/// Reports that the server process is up.
///
/// # Endpoint
///
/// `GET /api`
pub async fn status_handler() -> &'static str {
    "Server is running"
}
