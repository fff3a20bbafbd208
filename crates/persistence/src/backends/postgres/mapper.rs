//! Row mapping from the clinical tables to source records.
//!
//! Integer columns are selected as `int8` so that `INTEGER` and `BIGINT`
//! schemas read the same way. A NULL in a required column or a column of the
//! wrong type surfaces as a `tokio_postgres::Error`; nothing is defaulted.

use tokio_postgres::Row;

use crate::types::{BloodPressureRecord, ClinicalObservation, HeartRateRecord, PatientRecord};

/// Columns selected from `patients`.
pub(crate) const PATIENT_COLUMNS: &str =
    "id::int8 AS id, first_name, last_name, date_of_birth";

/// Columns selected from `blood_pressure`.
pub(crate) const BLOOD_PRESSURE_COLUMNS: &str = "id::int8 AS id, patient_id::int8 AS patient_id, \
     systolic::int8 AS systolic, diastolic::int8 AS diastolic, date";

/// Columns selected from `heart_rate`.
pub(crate) const HEART_RATE_COLUMNS: &str =
    "id::int8 AS id, patient_id::int8 AS patient_id, rate::int8 AS rate, date";

/// Reads a `patients` row.
pub fn patient_record(row: &Row) -> Result<PatientRecord, tokio_postgres::Error> {
    Ok(PatientRecord {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
    })
}

/// Reads a `blood_pressure` row as a reading.
pub fn blood_pressure_reading(row: &Row) -> Result<ClinicalObservation, tokio_postgres::Error> {
    Ok(ClinicalObservation::from(BloodPressureRecord {
        id: row.try_get("id")?,
        patient_id: row.try_get("patient_id")?,
        systolic: row.try_get("systolic")?,
        diastolic: row.try_get("diastolic")?,
        date: row.try_get("date")?,
    }))
}

/// Reads a `heart_rate` row as a reading.
pub fn heart_rate_reading(row: &Row) -> Result<ClinicalObservation, tokio_postgres::Error> {
    Ok(ClinicalObservation::from(HeartRateRecord {
        id: row.try_get("id")?,
        patient_id: row.try_get("patient_id")?,
        rate: row.try_get("rate")?,
        date: row.try_get("date")?,
    }))
}
