//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and
//! load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use vitalis_persistence::ClinicalStorage;

use crate::error::RestResult;
use crate::handlers::run_lookup;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ClinicalStorage + 'static,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Runs a trivial query against the database.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - The database answered
/// - `503 Service Unavailable` - The database check failed
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: ClinicalStorage + 'static,
{
    debug!("Processing readiness check request");

    let backend_name = state.storage().backend_name();

    match run_lookup(&state, |storage| storage.health_check()).await {
        Ok(()) => {
            let response = serde_json::json!({
                "status": "ready",
                "backend": backend_name,
                "checks": {
                    "storage": "ok"
                }
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            let response = serde_json::json!({
                "status": "not ready",
                "backend": backend_name,
                "checks": {
                    "storage": e.to_string()
                }
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}
