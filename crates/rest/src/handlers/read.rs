//! Read interaction handler.
//!
//! Implements the FHIR [read interaction](https://hl7.org/fhir/http.html#read):
//! `GET [base]/[type]/[id]`

use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
};
use tracing::debug;
use vitalis_fhir::json::resource_to_json;
use vitalis_persistence::ClinicalStorage;
use vitalis_persistence::core::registry;

use crate::error::RestResult;
use crate::handlers::run_lookup;
use crate::responses::{fhir_json_response, negotiate_format};
use crate::state::AppState;

/// Handler for the read interaction.
///
/// # HTTP Request
///
/// `GET [base]/[type]/[id]`
///
/// # Response
///
/// - `200 OK` - Resource found, returns the resource
/// - `400 Bad Request` - The id is not an integer, or the path is malformed
/// - `404 Not Found` - Resource does not exist, or the type is not served
/// - `406 Not Acceptable` - `_format` asks for something other than JSON
/// - `500 Internal Server Error` - The stored row could not be read
///
/// For `Observation`, blood-pressure rows are consulted before heart-rate
/// rows, so when both tables hold the id the blood-pressure reading wins.
pub async fn read_handler<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> RestResult<Response>
where
    S: ClinicalStorage + 'static,
{
    let Path((resource_type, id)) = path?;
    let Query(params) = query?;

    debug!(
        resource_type = %resource_type,
        id = %id,
        "Processing read request"
    );

    negotiate_format(&params)?;
    let kind = registry::resolve_kind(&resource_type)?;
    let resource = run_lookup(&state, move |storage| {
        registry::read_by_id(storage, kind, &id)
    })
    .await?;

    Ok(fhir_json_response(
        StatusCode::OK,
        resource_to_json(&resource)?,
    ))
}
