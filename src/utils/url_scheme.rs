//! Destination URL scheme normalization.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Matches a leading letters-only scheme followed by `://`.
static SCHEME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+://").unwrap());

/// Scheme prepended to destinations stored without one.
pub const DEFAULT_SCHEME: &str = "http://";

/// Returns true if `url` starts with a `scheme://` prefix.
pub fn has_scheme(url: &str) -> bool {
    SCHEME_REGEX.is_match(url)
}

/// Prefixes `http://` to a destination lacking a scheme.
///
/// Applied at redirect time only; the stored value is never rewritten.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(ensure_scheme("example.com"), "http://example.com");
/// assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
/// ```
pub fn ensure_scheme(url: &str) -> Cow<'_, str> {
    if has_scheme(url) {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{}{}", DEFAULT_SCHEME, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_http() {
        assert_eq!(ensure_scheme("example.com"), "http://example.com");
        assert_eq!(ensure_scheme("example.com/a?b=c"), "http://example.com/a?b=c");
    }

    #[test]
    fn test_existing_scheme_untouched() {
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("FTP://files.example.com"), "FTP://files.example.com");
        assert!(matches!(ensure_scheme("https://x.y"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_non_letter_scheme_is_not_a_scheme() {
        // Digits or punctuation before :// do not count as a scheme.
        assert!(!has_scheme("svn+ssh://host"));
        assert!(!has_scheme("h2://host"));
        assert!(!has_scheme("//example.com"));
        assert_eq!(ensure_scheme("mailto:me@example.com"), "http://mailto:me@example.com");
    }

    #[test]
    fn test_scheme_must_be_leading() {
        assert!(!has_scheme("example.com/?next=https://other.com"));
    }
}
