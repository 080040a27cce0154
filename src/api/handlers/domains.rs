//! Handler for custom domain registration.

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::error;

use crate::api::dto::domain::AddDomainQuery;
use crate::error::AppError;
use crate::infrastructure::vercel::DomainOutcome;
use crate::state::AppState;

/// Registers a custom domain with the hosting project.
///
/// # Endpoint
///
/// `POST /api/v5/domain?add={domain}`
///
/// # Response Codes
///
/// - **200 OK**: Domain added
/// - **400 Bad Request**: `add` missing or empty
/// - **403 Forbidden**: The hosting API refused the request
/// - **409 Conflict**: Domain already taken
/// - **500 Internal Server Error**: Hosting API unreachable
/// - **503 Service Unavailable**: Domain registration not configured
pub async fn add_domain_handler(
    State(state): State<AppState>,
    Query(query): Query<AddDomainQuery>,
) -> Result<StatusCode, AppError> {
    let Some(client) = state.domains.as_ref() else {
        return Err(AppError::unavailable(
            "Domain registration is not configured",
            json!({}),
        ));
    };

    let domain = query
        .add
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            AppError::bad_request("Missing 'add' query parameter", json!({ "field": "add" }))
        })?;

    match client.add_domain(domain).await {
        Ok(DomainOutcome::Added) => Ok(StatusCode::OK),
        Ok(DomainOutcome::Forbidden) => Err(AppError::forbidden(
            "Domain registration forbidden",
            json!({ "domain": domain }),
        )),
        Ok(DomainOutcome::Taken) => Err(AppError::conflict(
            "Domain already taken",
            json!({ "domain": domain }),
        )),
        Err(e) => {
            error!("Domain registration failed for {}: {}", domain, e);
            Err(AppError::internal(
                "Domain registration failed",
                json!({ "domain": domain }),
            ))
        }
    }
}
