//! Source records as they exist in the clinical tables.
//!
//! These are the proprietary shapes the facade translates from. They carry no
//! FHIR semantics of their own; conversion into resources happens through the
//! `TryFrom` impls below and in [`ClinicalObservation`](super::ClinicalObservation).

use chrono::NaiveDate;
use serde_json::{Value, json};
use vitalis_fhir::{ModelError, Patient, json as fhir_json};

use crate::error::{BackendError, StorageResult};

/// One row of the `patients` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    /// Primary key.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, if recorded.
    pub date_of_birth: Option<NaiveDate>,
}

/// One row of the `blood_pressure` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloodPressureRecord {
    /// Primary key, unique within `blood_pressure` only.
    pub id: i64,
    /// The patient the reading belongs to.
    pub patient_id: i64,
    /// Systolic pressure in mmHg.
    pub systolic: i64,
    /// Diastolic pressure in mmHg.
    pub diastolic: i64,
    /// Date of the reading.
    pub date: NaiveDate,
}

/// One row of the `heart_rate` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartRateRecord {
    /// Primary key, unique within `heart_rate` only.
    pub id: i64,
    /// The patient the reading belongs to.
    pub patient_id: i64,
    /// Beats per minute.
    pub rate: i64,
    /// Date of the reading.
    pub date: NaiveDate,
}

/// Formats a SQL date as a FHIR `date`.
pub(crate) fn fhir_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl PatientRecord {
    /// The FHIR JSON form of this row. `birthDate` is omitted when the date
    /// of birth is NULL.
    pub fn to_fhir_json(&self) -> Value {
        let mut patient = json!({
            "resourceType": "Patient",
            "id": self.id.to_string(),
            "name": [{
                "family": self.last_name,
                "given": [self.first_name],
            }],
        });
        if let Some(birth_date) = self.date_of_birth {
            patient["birthDate"] = Value::String(fhir_date(birth_date));
        }
        patient
    }
}

impl TryFrom<PatientRecord> for Patient {
    type Error = ModelError;

    fn try_from(record: PatientRecord) -> Result<Self, Self::Error> {
        fhir_json::patient_from_json(record.to_fhir_json())
    }
}

/// Converts patient rows in order.
pub(crate) fn patients_from(records: Vec<PatientRecord>) -> StorageResult<Vec<Patient>> {
    records.into_iter().map(patient_from).collect()
}

/// Converts one patient row.
pub(crate) fn patient_from(record: PatientRecord) -> StorageResult<Patient> {
    Patient::try_from(record).map_err(|e| BackendError::from_model("patients", e).into())
}
