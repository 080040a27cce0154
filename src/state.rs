//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{KeyGenerator, RedirectResolver, ShortenService, TieredCache};
use crate::domain::notifier::NotificationSink;
use crate::infrastructure::vercel::VercelClient;

/// Services owned by the running process.
///
/// Built once at startup (see [`crate::server::run`]) and cloned cheaply
/// into every request.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<TieredCache>,
    pub resolver: Arc<RedirectResolver>,
    pub shorten_service: Arc<ShortenService>,
    pub notifier: Arc<dyn NotificationSink>,
    /// `None` when domain registration is not configured.
    pub domains: Option<Arc<VercelClient>>,
}

impl AppState {
    /// Wires the services around a cache and a notifier.
    pub fn new(
        cache: Arc<TieredCache>,
        notifier: Arc<dyn NotificationSink>,
        domains: Option<Arc<VercelClient>>,
        keygen_batch_size: usize,
    ) -> Self {
        let generator = Arc::new(KeyGenerator::new(cache.clone(), keygen_batch_size));
        let resolver = Arc::new(RedirectResolver::new(cache.clone(), notifier.clone()));
        let shorten_service = Arc::new(ShortenService::new(cache.clone(), generator));

        Self {
            cache,
            resolver,
            shorten_service,
            notifier,
            domains,
        }
    }
}
