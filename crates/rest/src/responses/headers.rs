//! Response header generation.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Content type for FHIR JSON responses.
pub const FHIR_JSON: &str = "application/fhir+json; charset=utf-8";

/// Builds a JSON response with the FHIR JSON content type.
pub fn fhir_json_response(status: StatusCode, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(FHIR_JSON));
    response
}
