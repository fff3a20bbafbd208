//! ClinicalStorage implementation for SQLite.

use rusqlite::{Params, Row};
use tracing::{debug, trace};
use vitalis_fhir::{Observation, Patient};

use crate::core::ClinicalStorage;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{
    ClinicalObservation, observation_from, observations_from, patient_from, patients_from,
};

use super::SqliteBackend;
use super::backend::BACKEND_NAME;
use super::mapper::{
    BLOOD_PRESSURE_COLUMNS, HEART_RATE_COLUMNS, PATIENT_COLUMNS, blood_pressure_reading,
    heart_rate_reading, patient_record,
};

type RowMapper<T> = fn(&Row<'_>) -> rusqlite::Result<T>;

impl SqliteBackend {
    /// Runs a single-row query, returning `None` when no row matches.
    fn query_optional<T, P: Params>(
        &self,
        table: &str,
        sql: &str,
        params: P,
        map: RowMapper<T>,
    ) -> StorageResult<Option<T>> {
        let conn = self.get_connection()?;
        match conn.query_row(sql, params, map) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(BackendError::from_sqlite(table, e).into()),
        }
    }

    /// Runs a query and maps every row; one bad row fails the whole query.
    fn query_list<T, P: Params>(
        &self,
        table: &str,
        sql: &str,
        params: P,
        map: RowMapper<T>,
    ) -> StorageResult<Vec<T>> {
        let conn = self.get_connection()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| BackendError::from_sqlite(table, e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| BackendError::from_sqlite(table, e))?;
        let items = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BackendError::from_sqlite(table, e))?;
        trace!(table, count = items.len(), "Mapped rows");
        Ok(items)
    }

    fn blood_pressure_by_id(&self, id: i64) -> StorageResult<Option<ClinicalObservation>> {
        self.query_optional(
            "blood_pressure",
            &format!("SELECT {BLOOD_PRESSURE_COLUMNS} FROM blood_pressure WHERE id = ?1"),
            [id],
            blood_pressure_reading,
        )
    }

    fn heart_rate_by_id(&self, id: i64) -> StorageResult<Option<ClinicalObservation>> {
        self.query_optional(
            "heart_rate",
            &format!("SELECT {HEART_RATE_COLUMNS} FROM heart_rate WHERE id = ?1"),
            [id],
            heart_rate_reading,
        )
    }
}

impl ClinicalStorage for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn read_patient(&self, id: i64) -> StorageResult<Patient> {
        let record = self
            .query_optional(
                "patients",
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
                [id],
                patient_record,
            )?
            .ok_or_else(|| StorageError::not_found("Patient", id))?;
        patient_from(record)
    }

    fn read_observation(&self, id: i64) -> StorageResult<Observation> {
        let reading = match self.blood_pressure_by_id(id)? {
            Some(reading) => Some(reading),
            None => self.heart_rate_by_id(id)?,
        };
        match reading {
            Some(reading) => observation_from(reading),
            None => {
                debug!(id, "No blood pressure or heart rate reading with id");
                Err(StorageError::not_found("Observation", id))
            }
        }
    }

    fn observations_by_subject(&self, patient_id: i64) -> StorageResult<Vec<Observation>> {
        let mut readings = self.query_list(
            "blood_pressure",
            &format!("SELECT {BLOOD_PRESSURE_COLUMNS} FROM blood_pressure WHERE patient_id = ?1"),
            [patient_id],
            blood_pressure_reading,
        )?;
        readings.extend(self.query_list(
            "heart_rate",
            &format!("SELECT {HEART_RATE_COLUMNS} FROM heart_rate WHERE patient_id = ?1"),
            [patient_id],
            heart_rate_reading,
        )?);
        debug!(patient_id, count = readings.len(), "Subject search");
        observations_from(readings)
    }

    fn all_patients(&self) -> StorageResult<Vec<Patient>> {
        patients_from(self.query_list(
            "patients",
            &format!("SELECT {PATIENT_COLUMNS} FROM patients"),
            [],
            patient_record,
        )?)
    }

    fn all_observations(&self) -> StorageResult<Vec<Observation>> {
        let mut readings = self.query_list(
            "blood_pressure",
            &format!("SELECT {BLOOD_PRESSURE_COLUMNS} FROM blood_pressure"),
            [],
            blood_pressure_reading,
        )?;
        readings.extend(self.query_list(
            "heart_rate",
            &format!("SELECT {HEART_RATE_COLUMNS} FROM heart_rate"),
            [],
            heart_rate_reading,
        )?);
        observations_from(readings)
    }

    fn health_check(&self) -> StorageResult<()> {
        self.ping()
    }
}
