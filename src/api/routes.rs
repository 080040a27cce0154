//! API route configuration.

use crate::api::handlers::{add_domain_handler, shorten_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Versioned API routes, nested under `/api/v5`.
///
/// # Endpoints
///
/// - `POST /shorten`          - Create short keys for a list of URLs
/// - `POST /domain?add={d}`   - Register a custom domain
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/domain", post(add_domain_handler))
}
