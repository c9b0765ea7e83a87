//! Link entity representing a short code to target URL mapping.

use chrono::{DateTime, TimeDelta, Utc};

/// A shortened URL with its metadata.
///
/// `code` and `target_url` never change after creation. The only mutable
/// field is `click_count`, which the store increments atomically on each
/// successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    /// Identifier of the creating principal. Metadata only, never enforced.
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Lifetime in seconds, counted from `created_at`. `None` never expires.
    pub life_time_seconds: Option<i64>,
    pub click_count: i64,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        owner_id: Option<String>,
        created_at: DateTime<Utc>,
        life_time_seconds: Option<i64>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            owner_id,
            created_at,
            life_time_seconds,
            click_count,
        }
    }

    /// Returns the instant the link stops resolving, if it has a lifetime.
    ///
    /// A lifetime too large to represent is treated as no expiry.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.life_time_seconds
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| self.created_at.checked_add_signed(lifetime))
    }

    /// Returns true if the link's lifetime has elapsed at `now`.
    ///
    /// The boundary is inclusive: a zero lifetime is expired immediately.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| now >= expires_at)
    }

    /// Returns true if the link's lifetime has elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
    pub owner_id: Option<String>,
    pub life_time_seconds: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_with_lifetime(created_at: DateTime<Utc>, lifetime: Option<i64>) -> Link {
        Link::new(
            1,
            "abc123".to_string(),
            "https://example.com".to_string(),
            None,
            created_at,
            lifetime,
            0,
        )
    }

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = link_with_lifetime(now, None);

        assert_eq!(link.id, 1);
        assert_eq!(link.code, "abc123");
        assert_eq!(link.target_url, "https://example.com");
        assert!(link.owner_id.is_none());
        assert_eq!(link.created_at, now);
        assert_eq!(link.click_count, 0);
        assert!(link.expires_at().is_none());
        assert!(!link.is_expired());
    }

    #[test]
    fn test_zero_lifetime_is_expired_immediately() {
        let link = link_with_lifetime(Utc::now(), Some(0));
        assert!(link.is_expired());
    }

    #[test]
    fn test_lifetime_not_yet_elapsed() {
        let link = link_with_lifetime(Utc::now(), Some(3600));
        assert!(!link.is_expired());
    }

    #[test]
    fn test_lifetime_elapsed() {
        let link = link_with_lifetime(Utc::now() - Duration::seconds(61), Some(60));
        assert!(link.is_expired());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let created = Utc::now();
        let link = link_with_lifetime(created, Some(10));

        assert!(!link.is_expired_at(created + Duration::seconds(9)));
        assert!(link.is_expired_at(created + Duration::seconds(10)));
    }

    #[test]
    fn test_unrepresentable_lifetime_never_expires() {
        let link = link_with_lifetime(Utc::now(), Some(i64::MAX));
        assert!(link.expires_at().is_none());
        assert!(!link.is_expired());
    }
}
