//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten` (also mounted at `POST /v1/api/shorten`)
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page?x=1",
///   "ownerId": "user_2a9",       // optional
///   "lifeTimeSeconds": 86400     // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortUrl": "http://localhost:3000/k3x9ab",
///   "code": "k3x9ab",
///   "targetUrl": "https://example.com/page?x=1",
///   "createdAt": "2025-01-01T12:00:00Z",
///   "ownerId": "user_2a9",
///   "lifeTimeSeconds": 86400
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not a JSON object of the expected shape
/// - 400 Bad Request if the URL is missing or invalid (input echoed in `details`)
/// - 503 Service Unavailable if no unique code could be issued
/// - 500 Internal Server Error on store failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let ShortenRequest {
        url,
        owner_id,
        life_time_seconds,
    } = payload;

    let url = url.ok_or_else(|| AppError::bad_request("URL is required", json!({})))?;

    let result = state
        .link_service
        .shorten(url, owner_id, life_time_seconds)
        .await?;

    Ok(Json(result.into()))
}
