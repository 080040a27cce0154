//! HTTP server initialization and runtime setup.
//!
//! Builds the storage tiers and collaborators from [`Config`], then runs the
//! Axum server until a shutdown signal arrives.

use crate::application::services::TieredCache;
use crate::config::Config;
use crate::domain::notifier::NotificationSink;
use crate::domain::store::KeyValueStore;
use crate::infrastructure::notify::{NullNotifier, TelegramNotifier};
use crate::infrastructure::store::{NullStore, RedisStore, StaticSeed};
use crate::infrastructure::vercel::{VercelClient, VercelSettings};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the remote tier. Redis is connected lazily on first use, so an
/// unreachable server does not prevent startup.
///
/// # Errors
///
/// Returns an error if the Redis URL cannot be parsed.
pub fn build_remote_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisStore::new(
                url,
                config.redis_key_prefix.clone(),
                Duration::from_millis(config.remote_timeout_ms),
            )
            .context("Invalid Redis configuration")?;
            tracing::info!("Remote store enabled (Redis, lazy connection)");
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("Remote store disabled (NullStore)");
            Ok(Arc::new(NullStore::new()))
        }
    }
}

/// Builds the static seed table: built-in entries plus the optional seed file.
///
/// # Errors
///
/// Returns an error if the seed file cannot be read or parsed.
pub fn build_seed(config: &Config) -> Result<StaticSeed> {
    let seed = match &config.seed_file {
        Some(path) => StaticSeed::builtin().with_file(path)?,
        None => StaticSeed::builtin(),
    };
    tracing::info!("Static seed loaded ({} entries)", seed.len());
    Ok(seed)
}

/// Builds the tiered cache from configuration.
///
/// # Errors
///
/// See [`build_remote_store`] and [`build_seed`].
pub fn build_cache(config: &Config) -> Result<Arc<TieredCache>> {
    let seed = build_seed(config)?;
    let remote = build_remote_store(config)?;
    Ok(Arc::new(TieredCache::new(seed, remote)))
}

fn build_notifier(config: &Config) -> Arc<dyn NotificationSink> {
    let Some(telegram) = &config.telegram else {
        tracing::info!("Notifications disabled (NullNotifier)");
        return Arc::new(NullNotifier::new());
    };

    match TelegramNotifier::new(telegram.bot_token.clone(), telegram.chat_id.clone()) {
        Ok(notifier) => {
            tracing::info!("Notifications enabled (Telegram)");
            Arc::new(notifier)
        }
        Err(e) => {
            tracing::warn!("Failed to set up Telegram: {}. Using NullNotifier.", e);
            Arc::new(NullNotifier::new())
        }
    }
}

fn build_domain_client(config: &Config) -> Option<Arc<VercelClient>> {
    let vercel = config.vercel.as_ref()?;

    let settings = VercelSettings {
        api_base: vercel.api_base.clone(),
        project_id: vercel.project_id.clone(),
        team_id: vercel.team_id.clone(),
        bearer_token: vercel.bearer_token.clone(),
    };

    match VercelClient::new(settings) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("Failed to set up domain registration: {}", e);
            None
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Tiered cache (memory, static seed, Redis or NullStore)
/// - Notification sink (Telegram or NullNotifier)
/// - Domain registration client (if configured)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The seed file or Redis URL is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let cache = build_cache(&config)?;
    let notifier = build_notifier(&config);
    let domains = build_domain_client(&config);

    let state = AppState::new(cache, notifier, domains, config.keygen_batch_size);

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
            .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
