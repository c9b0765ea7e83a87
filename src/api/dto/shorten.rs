//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortenResult;

/// Request to shorten a URL.
///
/// `url` is optional at the serde level so that a missing field produces the
/// same `400 URL is required` response as an empty one.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be a valid HTTP/HTTPS URL).
    #[validate(required(message = "URL is required"))]
    pub url: Option<String>,

    /// Optional identifier of the creating principal. Stored as metadata only.
    #[validate(length(max = 255, message = "ownerId must be at most 255 characters"))]
    pub owner_id: Option<String>,

    /// Optional lifetime in seconds. After it elapses the link returns 410 Gone.
    #[validate(range(min = 0, message = "lifeTimeSeconds must not be negative"))]
    pub life_time_seconds: Option<i64>,
}

/// Response for a newly issued short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
    pub code: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_time_seconds: Option<i64>,
}

impl From<ShortenResult> for ShortenResponse {
    fn from(result: ShortenResult) -> Self {
        let link = result.link;

        Self {
            short_url: result.short_url,
            code: link.code,
            target_url: link.target_url,
            created_at: link.created_at,
            owner_id: link.owner_id,
            life_time_seconds: link.life_time_seconds,
        }
    }
}
