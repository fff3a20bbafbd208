//! Capabilities (CapabilityStatement) handler.
//!
//! Implements the FHIR [capabilities interaction](https://hl7.org/fhir/http.html#capabilities):
//! `GET [base]/metadata`

use axum::{extract::State, http::StatusCode, response::Response};
use serde_json::{Value, json};
use tracing::debug;
use vitalis_fhir::FHIR_VERSION;
use vitalis_persistence::ClinicalStorage;
use vitalis_persistence::core::{ResourceEntry, registry};

use crate::error::RestResult;
use crate::responses::fhir_json_response;
use crate::state::AppState;

/// Handler for the capabilities interaction.
///
/// Returns a CapabilityStatement listing each served resource type with its
/// interactions and search parameters.
///
/// # HTTP Request
///
/// `GET [base]/metadata`
pub async fn capabilities_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ClinicalStorage + 'static,
{
    debug!("Processing capabilities request");

    let capability_statement = build_capability_statement(&state);
    Ok(fhir_json_response(StatusCode::OK, capability_statement))
}

/// Builds a CapabilityStatement from the resource registry.
fn build_capability_statement<S>(state: &AppState<S>) -> Value
where
    S: ClinicalStorage,
{
    let resources: Vec<Value> = registry::entries()
        .iter()
        .map(build_resource_capability)
        .collect();

    json!({
        "resourceType": "CapabilityStatement",
        "status": "active",
        "date": chrono::Utc::now().format("%Y-%m-%d").to_string(),
        "kind": "instance",
        "software": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        },
        "implementation": {
            "description": format!(
                "Read-only FHIR facade ({} backend)",
                state.storage().backend_name()
            ),
            "url": state.base_url()
        },
        "fhirVersion": FHIR_VERSION,
        "format": ["json"],
        "rest": [{
            "mode": "server",
            "resource": resources
        }]
    })
}

/// Builds the capability entry for one resource type.
fn build_resource_capability(entry: &ResourceEntry) -> Value {
    let search_params: Vec<Value> = entry
        .search_params
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "type": p.param_type,
                "documentation": p.documentation
            })
        })
        .collect();

    let mut resource = json!({
        "type": entry.kind.as_str(),
        "interaction": [
            {"code": "read"},
            {"code": "search-type"}
        ]
    });

    if !search_params.is_empty() {
        resource["searchParam"] = Value::Array(search_params);
    }

    resource
}
