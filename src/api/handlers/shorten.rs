//! Handler for the link shortening endpoint.

use axum::{Json, body::Bytes, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResultItem};
use crate::error::AppError;
use crate::state::AppState;

/// Creates short keys for a list of URLs.
///
/// # Endpoint
///
/// `POST /api/v5/shorten`
///
/// # Request Body
///
/// JSON, accepted whatever the `Content-Type` (form posts often send it as
/// plain text):
///
/// ```json
/// {
///   "urls": "example.com\nhttps://example.org/page",
///   "password": "abc"
/// }
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "key": "k3x9a0", "url": "example.com" },
///   { "key": "p01zzq", "url": "https://example.org/page" }
/// ]
/// ```
///
/// `key` is always the bare token. With a password the link is stored as
/// `key$password` and visiting `/key` leads to the unlock page.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON, `urls` is missing,
/// or validation fails.
/// Returns 409 Conflict if no free key could be allocated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Vec<ShortenResultItem>>, AppError> {
    let payload: ShortenRequest = serde_json::from_slice(&body)?;
    payload.validate()?;

    let links = state
        .shorten_service
        .shorten(&payload.urls, payload.password())
        .await?;

    Ok(Json(links))
}
