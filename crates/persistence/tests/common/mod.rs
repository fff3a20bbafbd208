//! Test infrastructure for the persistence layer.
//!
//! Lookups return typed R4 resources; assertions go through their FHIR JSON
//! form so they read the same as the wire format.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use std::collections::BTreeSet;

use serde_json::Value;
use vitalis_fhir::json::{resource_to_json, wrap_observation, wrap_patient};
use vitalis_fhir::{Observation, Patient, loinc};

/// FHIR JSON for a patient.
pub fn patient_json(patient: Patient) -> Value {
    resource_to_json(&wrap_patient(patient)).expect("Patient should serialize")
}

/// FHIR JSON for an observation.
pub fn observation_json(observation: Observation) -> Value {
    resource_to_json(&wrap_observation(observation)).expect("Observation should serialize")
}

/// FHIR JSON for a list of observations, order preserved.
pub fn observations_json(observations: Vec<Observation>) -> Vec<Value> {
    observations.into_iter().map(observation_json).collect()
}

/// Logical ids in order.
pub fn ids(resources: &[Value]) -> Vec<&str> {
    resources
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default())
        .collect()
}

/// Whether the observation is coded as a blood pressure panel.
pub fn is_blood_pressure(observation: &Value) -> bool {
    observation["code"]["coding"][0]["code"] == loinc::BLOOD_PRESSURE
}

/// The `(value, unit)` of the component coded `code`.
pub fn component_value(observation: &Value, code: &str) -> Option<(f64, String)> {
    observation["component"]
        .as_array()?
        .iter()
        .find(|c| c["code"]["coding"][0]["code"] == code)
        .and_then(|c| quantity(&c["valueQuantity"]))
}

/// The `(value, unit)` of a Quantity element.
pub fn quantity(value: &Value) -> Option<(f64, String)> {
    Some((value["value"].as_f64()?, value["unit"].as_str()?.to_string()))
}

/// Splits an observation listing into its blood pressure and heart rate
/// segments, asserting that blood pressure readings come first.
pub fn segments(observations: Vec<Observation>) -> (BTreeSet<String>, BTreeSet<String>) {
    let values = observations_json(observations);
    let bp_len = values.iter().take_while(|v| is_blood_pressure(v)).count();
    let (bp, hr) = values.split_at(bp_len);
    assert!(
        hr.iter().all(|v| !is_blood_pressure(v)),
        "blood pressure reading after a heart rate reading"
    );
    (
        bp.iter().map(Value::to_string).collect(),
        hr.iter().map(Value::to_string).collect(),
    )
}
