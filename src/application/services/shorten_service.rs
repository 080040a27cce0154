//! Write path: turns a list of destination URLs into short keys.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::application::services::key_generator::KeyGenerator;
use crate::application::services::tiered_cache::TieredCache;
use crate::error::AppError;

/// Separators between URLs in a shorten payload.
static URL_SEPARATOR_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n,]+").unwrap());

/// Key generations attempted per URL when the conditional insert loses a race.
const MAX_INSERT_ATTEMPTS: usize = 5;

/// A stored short link as reported back to the writer.
///
/// `key` is always the bare token, even for password-protected links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenedLink {
    pub key: String,
    pub url: String,
}

/// Splits a newline/comma separated list into trimmed, non-empty URLs.
pub fn parse_urls(raw: &str) -> Vec<String> {
    URL_SEPARATOR_REGEX
        .split(raw.trim())
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

/// Creates short links.
pub struct ShortenService {
    cache: Arc<TieredCache>,
    generator: Arc<KeyGenerator>,
}

impl ShortenService {
    pub fn new(cache: Arc<TieredCache>, generator: Arc<KeyGenerator>) -> Self {
        Self { cache, generator }
    }

    /// Shortens every URL in `raw`, optionally gating them behind `password`.
    ///
    /// URLs are stored as given; scheme defaulting happens at redirect time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if no free key could be allocated.
    pub async fn shorten(
        &self,
        raw: &str,
        password: Option<&str>,
    ) -> Result<Vec<ShortenedLink>, AppError> {
        let urls = parse_urls(raw);
        debug!("Shortening {} URL(s)", urls.len());

        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(self.shorten_one(url, password).await?);
        }

        Ok(results)
    }

    async fn shorten_one(
        &self,
        url: String,
        password: Option<&str>,
    ) -> Result<ShortenedLink, AppError> {
        for _ in 0..MAX_INSERT_ATTEMPTS {
            let key = self.generator.generate(password).await?;
            let storage_key = key.storage_key();

            if self.cache.insert_new(&storage_key, &url).await {
                info!("Stored short link {} (secure: {})", key.bare(), key.is_secure());
                return Ok(ShortenedLink {
                    key: key.bare().to_string(),
                    url,
                });
            }

            debug!("Lost insert race for {}, retrying", key.bare());
        }

        Err(AppError::conflict(
            "Failed to store short link",
            json!({ "reason": "Too many collisions", "url": url }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::MockKeyValueStore;
    use crate::infrastructure::store::{NullStore, StaticSeed};

    fn service() -> (ShortenService, Arc<TieredCache>) {
        let cache = Arc::new(TieredCache::new(
            StaticSeed::empty(),
            Arc::new(NullStore::new()),
        ));
        let generator = Arc::new(KeyGenerator::new(cache.clone(), 4));
        (ShortenService::new(cache.clone(), generator), cache)
    }

    #[test]
    fn test_parse_urls() {
        assert_eq!(
            parse_urls("a.com\nb.com,c.com,,\n\nd.com"),
            vec!["a.com", "b.com", "c.com", "d.com"]
        );
        assert_eq!(parse_urls("  a.com , b.com\r\n"), vec!["a.com", "b.com"]);
        assert!(parse_urls("").is_empty());
        assert!(parse_urls(" ,\n, ").is_empty());
    }

    #[tokio::test]
    async fn test_shorten_open_link() {
        let (service, cache) = service();

        let links = service.shorten("example.com", None).await.unwrap();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "example.com");
        assert_eq!(links[0].key.len(), 6);
        assert_eq!(
            cache.get(&links[0].key).await.as_deref(),
            Some("example.com")
        );
    }

    #[tokio::test]
    async fn test_shorten_secure_link_reports_bare_key() {
        let (service, cache) = service();

        let links = service.shorten("example.org", Some("abc")).await.unwrap();

        let key = &links[0].key;
        assert!(!key.contains('$'));
        assert!(cache.get(key).await.is_none());
        assert_eq!(
            cache.get(&format!("{}$abc", key)).await.as_deref(),
            Some("example.org")
        );
    }

    #[tokio::test]
    async fn test_shorten_empty_password_is_open() {
        let (service, cache) = service();

        let links = service.shorten("example.com", Some("")).await.unwrap();

        assert_eq!(
            cache.get(&links[0].key).await.as_deref(),
            Some("example.com")
        );
    }

    #[tokio::test]
    async fn test_shorten_many() {
        let (service, _) = service();

        let links = service
            .shorten("a.com\nb.com,c.com", None)
            .await
            .unwrap();

        let urls: Vec<_> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["a.com", "b.com", "c.com"]);

        let keys: std::collections::HashSet<_> = links.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys.len(), 3);
    }

    #[tokio::test]
    async fn test_shorten_gives_up_when_remote_keeps_rejecting() {
        let mut remote = MockKeyValueStore::new();
        remote.expect_get().returning(|_| Ok(None));
        remote.expect_set_if_absent().returning(|_, _| Ok(false));

        let cache = Arc::new(TieredCache::new(StaticSeed::empty(), Arc::new(remote)));
        let generator = Arc::new(KeyGenerator::new(cache.clone(), 1));
        let service = ShortenService::new(cache, generator);

        let result = service.shorten("example.com", None).await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }
}
