//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{key}`       - Short link redirect, handled by middleware before routing
//! - `GET  /health`      - Health check: remote store and memory tier
//! - `/api/v5/*`         - Write API
//! - everything else     - Static files from the configured directory
//!
//! # Middleware
//!
//! - **Redirect** - Resolves short keys ahead of every route
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{redirect, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory served for paths that are not short keys
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, static_dir))
}

/// Same as [`app_router`] without trailing-slash normalization.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v5", api::routes::api_routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn_with_state(state.clone(), redirect::layer))
        .with_state(state)
        .layer(tracing::layer())
}
