//! Parsing of request selectors into table keys.
//!
//! Every table is keyed by an integer, so a selector that is not an integer
//! can never match a row. Such selectors are rejected here as caller errors,
//! before any query is issued.

use vitalis_fhir::ResourceKind;

use crate::error::ValidationError;

/// Parses the id segment of a read request.
pub fn parse_resource_id(kind: ResourceKind, raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidSelector {
            parameter: format!("{}.id", kind),
            value: raw.to_string(),
            message: "resource ids are integers".to_string(),
        })
}

/// Parses a subject reference into a patient id.
///
/// Accepts a bare id (`123`), a relative reference (`Patient/123`) or an
/// absolute one ending in `Patient/123`. References to any other resource
/// type are rejected.
pub fn parse_subject_reference(raw: &str) -> Result<i64, ValidationError> {
    let invalid = |message: &str| ValidationError::InvalidSelector {
        parameter: "subject".to_string(),
        value: raw.to_string(),
        message: message.to_string(),
    };

    let id_part = match raw.rsplit_once('/') {
        None => raw,
        Some((prefix, id)) => {
            let resource_type = prefix.rsplit('/').next().unwrap_or(prefix);
            if resource_type != "Patient" {
                return Err(invalid("subject must reference a Patient"));
            }
            id
        }
    };

    id_part
        .parse::<i64>()
        .map_err(|_| invalid("patient ids are integers"))
}
