//! Request-time redirect decision.

use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::application::services::tiered_cache::TieredCache;
use crate::domain::notifier::NotificationSink;
use crate::domain::resolution::{RequestMeta, Resolution};
use crate::domain::short_key::{SECURE_SEPARATOR, bare_token};
use crate::utils::url_scheme::ensure_scheme;

/// Paths that are never treated as short keys.
const RESERVED_PATHS: &[&str] = &["favicon.ico", "health"];

/// API namespace segment.
const API_SEGMENT: &str = "api";

/// Failures while resolving a path. Always downgraded to pass-through.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Path is not valid UTF-8 after percent-decoding: {0}")]
    InvalidPath(#[from] std::string::FromUtf8Error),

    #[error("Stored destination {target:?} is not a valid URL: {source}")]
    InvalidTarget {
        target: String,
        source: url::ParseError,
    },
}

/// Decides, for a request path, between redirecting to a stored URL,
/// redirecting to the unlock challenge, or letting the request through.
///
/// # Decision Flow
///
/// 1. Empty or reserved path → pass-through
/// 2. Key found in the cache → redirect to the destination (scheme defaulted
///    to `http://`), with a background notification
/// 3. A secure key exists whose bare token equals the path → unlock
/// 4. Path itself contains `$` → unlock for the part before it
/// 5. Otherwise → pass-through
///
/// Any failure along the way yields [`Resolution::ErrorPassThrough`].
pub struct RedirectResolver {
    cache: Arc<TieredCache>,
    notifier: Arc<dyn NotificationSink>,
}

impl RedirectResolver {
    pub fn new(cache: Arc<TieredCache>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self { cache, notifier }
    }

    /// Resolves a raw request pathname such as `/abc123`.
    pub async fn resolve(&self, pathname: &str, meta: &RequestMeta) -> Resolution {
        match self.try_resolve(pathname, meta).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!("Redirect resolution failed for {}: {}", pathname, e);
                Resolution::ErrorPassThrough
            }
        }
    }

    async fn try_resolve(
        &self,
        pathname: &str,
        meta: &RequestMeta,
    ) -> Result<Resolution, ResolveError> {
        let raw = pathname.strip_prefix('/').unwrap_or(pathname);
        let path = urlencoding::decode(raw)?;

        if is_excluded(&path) {
            return Ok(Resolution::PassThrough);
        }

        if let Some(stored) = self.cache.get(&path).await {
            let target = ensure_scheme(&stored).into_owned();
            Url::parse(&target).map_err(|source| ResolveError::InvalidTarget {
                target: target.clone(),
                source,
            })?;

            self.dispatch_notification(&path, meta);

            info!("Redirecting {} -> {}", path, target);
            return Ok(Resolution::RedirectTarget(target));
        }

        let has_secure_key = self
            .cache
            .keys()
            .await
            .iter()
            .any(|key| key.contains(SECURE_SEPARATOR) && bare_token(key) == path);

        if has_secure_key {
            debug!("Secure key found for {}", path);
            return Ok(Resolution::RedirectUnlock(path.into_owned()));
        }

        if path.contains(SECURE_SEPARATOR) {
            debug!("Direct secure key probe: {}", path);
            return Ok(Resolution::RedirectUnlock(bare_token(&path).to_string()));
        }

        debug!("No short link for {}, passing through", path);
        Ok(Resolution::PassThrough)
    }

    /// Sends the access alert in a detached task; failures only reach logs.
    fn dispatch_notification(&self, path: &str, meta: &RequestMeta) {
        if !self.notifier.is_enabled() {
            return;
        }

        let text = access_message(path, meta);
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&text).await {
                warn!("Failed to send access notification: {}", e);
            }
        });
    }
}

fn is_excluded(path: &str) -> bool {
    path.is_empty()
        || RESERVED_PATHS.contains(&path)
        || path.split('/').next() == Some(API_SEGMENT)
        || path.contains("/api/")
}

fn access_message(path: &str, meta: &RequestMeta) -> String {
    format!(
        "Shortlink accessed: {}/{}\nLocation: {}",
        meta.origin,
        path,
        meta.geo.describe()
    )
}
