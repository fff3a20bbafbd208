//! FHIR route configuration.
//!
//! Defines all routes for the read-only FHIR RESTful API.

use axum::{Router, routing::get};
use vitalis_persistence::ClinicalStorage;

use crate::handlers;
use crate::state::AppState;

/// Creates all FHIR REST API routes.
///
/// # Routes
///
/// ## System-level
/// - `GET /metadata` - CapabilityStatement
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Type-level
/// - `GET /{type}` - Search, or list all
///
/// ## Instance-level
/// - `GET /{type}/{id}` - Read
///
/// Anything else is answered by the fallback handler.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ClinicalStorage + 'static,
{
    Router::new()
        // System-level routes
        .route("/metadata", get(handlers::capabilities_handler::<S>))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        // Type-level routes
        .route("/{resource_type}", get(handlers::search_handler::<S>))
        // Instance-level routes
        .route("/{resource_type}/{id}", get(handlers::read_handler::<S>))
        .fallback(handlers::fallback_handler)
        // State
        .with_state(state)
}
