//! Short link resolution in front of every route.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::state::AppState;
use crate::utils::request_meta::extract_request_meta;

/// Resolves the request path before routing.
///
/// Short keys become `307 Temporary Redirect` responses, either to the
/// stored destination or to `/unlock?key=...` for password-protected links.
/// Everything else, including resolution failures and destinations that
/// cannot be sent as a `Location` header, reaches the inner router untouched.
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api/v5", api_routes())
///     .layer(middleware::from_fn_with_state(state.clone(), redirect::layer));
/// ```
pub async fn layer(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let meta = extract_request_meta(req.headers());
    let resolution = state.resolver.resolve(req.uri().path(), &meta).await;

    let Some(location) = resolution.location() else {
        return next.run(req).await;
    };

    match HeaderValue::try_from(location) {
        Ok(value) => {
            debug!("{} resolved to {:?}", req.uri().path(), resolution);
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response()
        }
        Err(e) => {
            warn!("Unusable redirect location for {}: {}", req.uri().path(), e);
            next.run(req).await
        }
    }
}
