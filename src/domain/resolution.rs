//! Redirect decisions and the request metadata they are based on.

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path is not a short key; the request continues unchanged.
    PassThrough,
    /// Redirect to the stored destination (scheme already normalized).
    RedirectTarget(String),
    /// Redirect to the unlock challenge for the given bare token.
    RedirectUnlock(String),
    /// Resolution failed; behaves exactly like [`Resolution::PassThrough`].
    ErrorPassThrough,
}

impl Resolution {
    /// Returns true for both pass-through variants.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough | Self::ErrorPassThrough)
    }

    /// Location header value for redirecting variants.
    pub fn location(&self) -> Option<String> {
        match self {
            Self::RedirectTarget(url) => Some(url.clone()),
            Self::RedirectUnlock(bare) => Some(format!(
                "/unlock?key={}",
                urlencoding::encode(bare)
            )),
            Self::PassThrough | Self::ErrorPassThrough => None,
        }
    }
}

/// Approximate location of the requester, as reported by the edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoInfo {
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl GeoInfo {
    /// Formats the location as `city, region, country` with `Unknown` gaps.
    pub fn describe(&self) -> String {
        let part = |v: &Option<String>| v.clone().unwrap_or_else(|| "Unknown".to_string());
        format!(
            "{}, {}, {}",
            part(&self.city),
            part(&self.region),
            part(&self.country)
        )
    }
}

/// Request data the resolver needs besides the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    /// Scheme and host the request was addressed to, e.g. `https://s.example.com`.
    pub origin: String,
    pub geo: GeoInfo,
}

impl Default for RequestMeta {
    fn default() -> Self {
        Self {
            origin: "http://localhost".to_string(),
            geo: GeoInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_location_is_relative() {
        let r = Resolution::RedirectUnlock("abc123".to_string());
        assert_eq!(r.location().unwrap(), "/unlock?key=abc123");
    }

    #[test]
    fn test_unlock_location_encodes_key() {
        let r = Resolution::RedirectUnlock("a b&c".to_string());
        assert_eq!(r.location().unwrap(), "/unlock?key=a%20b%26c");
    }

    #[test]
    fn test_pass_through_has_no_location() {
        assert!(Resolution::PassThrough.location().is_none());
        assert!(Resolution::ErrorPassThrough.location().is_none());
        assert!(Resolution::ErrorPassThrough.is_pass_through());
    }

    #[test]
    fn test_geo_describe_defaults() {
        let geo = GeoInfo {
            city: Some("Berlin".to_string()),
            region: None,
            country: Some("DE".to_string()),
        };
        assert_eq!(geo.describe(), "Berlin, Unknown, DE");
        assert_eq!(GeoInfo::default().describe(), "Unknown, Unknown, Unknown");
    }
}
