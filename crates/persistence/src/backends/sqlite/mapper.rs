//! Row mapping from the clinical tables to source records.
//!
//! Each mapper reads its columns by name. A missing column, a NULL in a
//! required column or an unparsable date surfaces as a `rusqlite::Error`;
//! nothing is defaulted. Records become FHIR resources afterwards, outside
//! the row callback.

use rusqlite::Row;

use crate::types::{BloodPressureRecord, ClinicalObservation, HeartRateRecord, PatientRecord};

/// Columns selected from `patients`.
pub(crate) const PATIENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth";

/// Columns selected from `blood_pressure`.
pub(crate) const BLOOD_PRESSURE_COLUMNS: &str = "id, patient_id, systolic, diastolic, date";

/// Columns selected from `heart_rate`.
pub(crate) const HEART_RATE_COLUMNS: &str = "id, patient_id, rate, date";

/// Reads a `patients` row.
pub fn patient_record(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    Ok(PatientRecord {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        date_of_birth: row.get("date_of_birth")?,
    })
}

/// Reads a `blood_pressure` row.
pub fn blood_pressure_record(row: &Row<'_>) -> rusqlite::Result<BloodPressureRecord> {
    Ok(BloodPressureRecord {
        id: row.get("id")?,
        patient_id: row.get("patient_id")?,
        systolic: row.get("systolic")?,
        diastolic: row.get("diastolic")?,
        date: row.get("date")?,
    })
}

/// Reads a `heart_rate` row.
pub fn heart_rate_record(row: &Row<'_>) -> rusqlite::Result<HeartRateRecord> {
    Ok(HeartRateRecord {
        id: row.get("id")?,
        patient_id: row.get("patient_id")?,
        rate: row.get("rate")?,
        date: row.get("date")?,
    })
}

/// Reads a `blood_pressure` row as a reading.
pub fn blood_pressure_reading(row: &Row<'_>) -> rusqlite::Result<ClinicalObservation> {
    blood_pressure_record(row).map(ClinicalObservation::from)
}

/// Reads a `heart_rate` row as a reading.
pub fn heart_rate_reading(row: &Row<'_>) -> rusqlite::Result<ClinicalObservation> {
    heart_rate_record(row).map(ClinicalObservation::from)
}
