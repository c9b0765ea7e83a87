//! Short code issuance and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::code_source::CodeSource;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_reserved;
use crate::utils::url_validator::{DEFAULT_MAX_URL_LENGTH, validate_target_url};

/// Tunables for issuance and short URL construction.
#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    /// Prefix of every returned short URL, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Maximum accepted target URL length, in characters.
    pub max_url_length: usize,
    /// Total number of candidate codes tried before giving up.
    pub max_attempts: usize,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            max_url_length: DEFAULT_MAX_URL_LENGTH,
            max_attempts: 5,
        }
    }
}

/// Outcome of a successful issuance.
#[derive(Debug, Clone)]
pub struct ShortenResult {
    pub short_url: String,
    pub link: Link,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    pub target_url: String,
    /// Click counter value after this resolution was counted.
    pub click_count: i64,
}

/// Service for issuing short codes and resolving them back to target URLs.
///
/// Both collaborators are injected: the link store provides durability and
/// all atomicity guarantees, the code source provides candidate codes. The
/// service itself keeps no mutable state.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_source: Arc<dyn CodeSource>,
    settings: ShortenerSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_source: Arc<dyn CodeSource>,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            link_repository,
            code_source,
            settings,
        }
    }

    /// Creates a short link for `target_url`.
    ///
    /// # Code Generation
    ///
    /// Candidate codes come from the injected [`CodeSource`] and are persisted
    /// with the store's insert-if-absent operation. A taken or reserved code is
    /// discarded and a new one drawn, up to `max_attempts` candidates in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - URL is missing, malformed or too long
    /// - `life_time_seconds` is negative
    ///
    /// Returns [`AppError::CapacityExhausted`] if every candidate collided.
    ///
    /// Returns [`AppError::Internal`] on store failures (not retried).
    pub async fn shorten(
        &self,
        target_url: String,
        owner_id: Option<String>,
        life_time_seconds: Option<i64>,
    ) -> Result<ShortenResult, AppError> {
        validate_target_url(&target_url, self.settings.max_url_length).map_err(|e| {
            AppError::bad_request(
                e.to_string(),
                json!({ "url": target_url, "max_length": self.settings.max_url_length }),
            )
        })?;

        if let Some(seconds) = life_time_seconds
            && seconds < 0
        {
            return Err(AppError::bad_request(
                "lifeTimeSeconds must not be negative",
                json!({ "lifeTimeSeconds": seconds }),
            ));
        }

        for attempt in 1..=self.settings.max_attempts {
            let code = self.code_source.generate();

            if is_reserved(&code) {
                debug!(attempt, code = %code, "Generated code is reserved, retrying");
                continue;
            }

            let new_link = NewLink {
                code,
                target_url: target_url.clone(),
                owner_id: owner_id.clone(),
                life_time_seconds,
            };

            match self.link_repository.insert_if_absent(new_link).await {
                Ok(link) => {
                    let short_url = self.short_url(&link.code);
                    info!(code = %link.code, attempt, "Issued short link");
                    return Ok(ShortenResult { short_url, link });
                }
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "Short code collision, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.settings.max_attempts,
            "Failed to issue a unique short code"
        );

        Err(AppError::capacity_exhausted(
            "Failed to generate unique code",
            json!({ "attempts": self.settings.max_attempts }),
        ))
    }

    /// Resolves a short code to its target URL and counts the click.
    ///
    /// Expired links are rejected but never deleted, and a rejected
    /// resolution does not count as a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is empty or unknown.
    /// Returns [`AppError::Gone`] if the link's lifetime has elapsed.
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn resolve(&self, code: &str) -> Result<ResolveResult, AppError> {
        let link = self.get_link(code).await?;

        if link.is_expired() {
            debug!(code = %code, "Short link expired");
            return Err(AppError::gone(
                "Short link has expired",
                json!({ "code": code, "expired_at": link.expires_at() }),
            ));
        }

        let click_count = self.link_repository.increment_clicks(code).await?;
        debug!(code = %code, click_count, "Resolved short link");

        Ok(ResolveResult {
            target_url: link.target_url,
            click_count,
        })
    }

    /// Retrieves a link by its short code without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is empty or unknown.
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        if code.is_empty() {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    /// Checks that the link store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the probe fails.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}
