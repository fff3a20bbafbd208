//! Conversions between FHIR JSON and the typed R4 resources.
//!
//! Resources are built by deserializing their wire shape through the
//! helios-fhir serde implementation, so whatever the facade emits is exactly
//! what the R4 model accepts. Absent optional elements stay absent on the way
//! back out.

use serde_json::Value;
use thiserror::Error;

use helios_fhir::r4::{Observation, Patient, Resource};

use crate::resource::ResourceKind;

/// Errors converting between FHIR JSON and the R4 model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The JSON is not a valid R4 resource.
    #[error("invalid FHIR JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is a valid resource of a different type.
    #[error("expected a {expected} resource, got {found}")]
    UnexpectedType {
        /// The type the caller asked for.
        expected: ResourceKind,
        /// The `resourceType` actually present.
        found: String,
    },
}

/// Parses any R4 resource from its JSON form.
pub fn resource_from_json(value: Value) -> Result<Resource, ModelError> {
    Ok(serde_json::from_value(value)?)
}

/// Serializes an R4 resource, `resourceType` included.
pub fn resource_to_json(resource: &Resource) -> Result<Value, ModelError> {
    Ok(serde_json::to_value(resource)?)
}

/// Parses a Patient from its JSON form.
pub fn patient_from_json(value: Value) -> Result<Patient, ModelError> {
    let found = resource_type_of(&value);
    match resource_from_json(value)? {
        Resource::Patient(patient) => Ok(*patient),
        _ => Err(ModelError::UnexpectedType {
            expected: ResourceKind::Patient,
            found,
        }),
    }
}

/// Parses an Observation from its JSON form.
pub fn observation_from_json(value: Value) -> Result<Observation, ModelError> {
    let found = resource_type_of(&value);
    match resource_from_json(value)? {
        Resource::Observation(observation) => Ok(*observation),
        _ => Err(ModelError::UnexpectedType {
            expected: ResourceKind::Observation,
            found,
        }),
    }
}

/// Wraps a patient as a polymorphic resource.
pub fn wrap_patient(patient: Patient) -> Resource {
    Resource::Patient(Box::new(patient))
}

/// Wraps an observation as a polymorphic resource.
pub fn wrap_observation(observation: Observation) -> Resource {
    Resource::Observation(Box::new(observation))
}

fn resource_type_of(value: &Value) -> String {
    value
        .get("resourceType")
        .and_then(Value::as_str)
        .unwrap_or("<missing>")
        .to_string()
}
