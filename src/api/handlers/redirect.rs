//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Each successful redirect increments the link's click counter exactly once.
/// The response carries `Cache-Control: no-store` so that browsers come back
/// through the service and every visit is counted.
///
/// # Errors
///
/// - 404 Not Found if the code is unknown
/// - 410 Gone if the link's lifetime has elapsed
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolved = state.link_service.resolve(&code).await?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, resolved.target_url),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
    )
        .into_response())
}
