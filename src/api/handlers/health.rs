//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Healthy, or running without a remote store
/// - **503 Service Unavailable**: A configured remote store does not answer
///
/// Redirects keep working from memory and the seed table while degraded.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "remote_store": { "status": "ok", "message": "Redis connected" },
///     "memory": { "status": "ok", "message": "12 entries" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let remote_check = check_remote(&state).await;

    let memory_check = CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("{} entries", state.cache.memory_len())),
    };

    let healthy = remote_check.status != "error";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            remote_store: remote_check,
            memory: memory_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks remote store connectivity via PING.
async fn check_remote(state: &AppState) -> CheckStatus {
    if !state.cache.remote_enabled() {
        return CheckStatus {
            status: "disabled".to_string(),
            message: Some("No remote store configured".to_string()),
        };
    }

    if state.cache.remote_health().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Redis connected".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Redis connection failed".to_string()),
        }
    }
}
