//! Target URL validation.
//!
//! Accepted URLs are absolute `http`/`https` URLs whose host is either a
//! dotted domain ending in an alphabetic label of at least two characters or a
//! dotted-quad IPv4 address, followed by an optional port, path, query string
//! and fragment. Matching is case-insensitive. The input is never rewritten:
//! what was submitted is what gets stored and redirected to.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;
use url::{Host, Url};

/// Default maximum accepted target URL length, in characters.
pub const DEFAULT_MAX_URL_LENGTH: usize = 2048;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(concat!(
        r"^https?://",
        r"(?:(?:[a-z\d](?:[a-z\d-]*[a-z\d])?\.)+[a-z]{2,}",
        r"|(?:\d{1,3}\.){3}\d{1,3})",
        r"(?::\d+)?",
        r"(?:/[-a-z\d%_.~+]*)*",
        r"(?:\?[;&a-z\d%_.~+=-]*)?",
        r"(?:#[-a-z\d_]*)?$",
    ))
    .case_insensitive(true)
    .build()
    .unwrap()
});

/// Reasons a target URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Missing,

    #[error("URL exceeds maximum length of {max} characters")]
    TooLong { max: usize, length: usize },

    #[error("Invalid URL format")]
    InvalidFormat,
}

/// Validates a target URL against the accepted pattern and length limit.
///
/// The pattern check is followed by a full parse so that out-of-range IPv4
/// octets and ports are rejected as well.
///
/// # Errors
///
/// - [`UrlValidationError::Missing`] for an empty string
/// - [`UrlValidationError::TooLong`] if longer than `max_length` characters
/// - [`UrlValidationError::InvalidFormat`] for anything that is not an
///   absolute http(s) URL of the accepted shape
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com/page?x=1", 2048).is_ok());
/// assert!(validate_target_url("not a url", 2048).is_err());
/// ```
pub fn validate_target_url(input: &str, max_length: usize) -> Result<(), UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Missing);
    }

    let length = input.chars().count();
    if length > max_length {
        return Err(UrlValidationError::TooLong {
            max: max_length,
            length,
        });
    }

    if !URL_PATTERN.is_match(input) {
        return Err(UrlValidationError::InvalidFormat);
    }

    let parsed = Url::parse(input).map_err(|_| UrlValidationError::InvalidFormat)?;

    match parsed.host() {
        Some(Host::Domain(_)) | Some(Host::Ipv4(_)) => Ok(()),
        _ => Err(UrlValidationError::InvalidFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(input: &str) -> Result<(), UrlValidationError> {
        validate_target_url(input, DEFAULT_MAX_URL_LENGTH)
    }

    #[test]
    fn test_accepts_simple_https() {
        assert!(check("https://example.com").is_ok());
    }

    #[test]
    fn test_accepts_path_and_query() {
        assert!(check("https://example.com/page?x=1").is_ok());
    }

    #[test]
    fn test_accepts_subdomain_port_and_fragment() {
        assert!(check("http://api.example.co.uk:8080/v1/users?page=2&sort=asc#top").is_ok());
    }

    #[test]
    fn test_accepts_ipv4_host() {
        assert!(check("http://192.168.1.1:8080/api").is_ok());
    }

    #[test]
    fn test_accepts_mixed_case() {
        assert!(check("HTTPS://EXAMPLE.COM/Path").is_ok());
    }

    #[test]
    fn test_accepts_hyphenated_domain() {
        assert!(check("https://my-site.example.org/a-b_c.d~e").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(check(""), Err(UrlValidationError::Missing));
    }

    #[test]
    fn test_rejects_plain_text() {
        assert_eq!(check("not a url"), Err(UrlValidationError::InvalidFormat));
    }

    #[test]
    fn test_rejects_missing_scheme() {
        assert_eq!(check("example.com"), Err(UrlValidationError::InvalidFormat));
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(check("ftp://example.com/file.txt").is_err());
        assert!(check("javascript:alert('xss')").is_err());
        assert!(check("mailto:test@example.com").is_err());
    }

    #[test]
    fn test_rejects_host_without_tld() {
        assert!(check("http://localhost:3000/test").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_ipv4() {
        assert!(check("http://256.1.1.1/").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_port() {
        assert!(check("http://example.com:99999/").is_err());
    }

    #[test]
    fn test_rejects_surrounding_whitespace() {
        assert!(check(" https://example.com").is_err());
        assert!(check("https://example.com ").is_err());
    }

    #[test]
    fn test_rejects_hyphen_edged_label() {
        assert!(check("https://-example.com").is_err());
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let prefix = "https://example.com/";
        let at_limit = format!("{}{}", prefix, "a".repeat(DEFAULT_MAX_URL_LENGTH - prefix.len()));
        assert_eq!(at_limit.len(), DEFAULT_MAX_URL_LENGTH);
        assert!(check(&at_limit).is_ok());

        let over_limit = format!("{}a", at_limit);
        assert_eq!(
            check(&over_limit),
            Err(UrlValidationError::TooLong {
                max: DEFAULT_MAX_URL_LENGTH,
                length: DEFAULT_MAX_URL_LENGTH + 1,
            })
        );
    }

    #[test]
    fn test_custom_length_limit() {
        assert!(validate_target_url("https://example.com/long", 10).is_err());
    }
}
