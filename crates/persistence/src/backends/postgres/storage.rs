//! ClinicalStorage implementation for PostgreSQL.

use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::{debug, trace};
use vitalis_fhir::{Observation, Patient};

use crate::core::ClinicalStorage;
use crate::error::{BackendError, StorageError, StorageResult};
use crate::types::{
    ClinicalObservation, observation_from, observations_from, patient_from, patients_from,
};

use super::PostgresBackend;
use super::backend::BACKEND_NAME;
use super::mapper::{
    BLOOD_PRESSURE_COLUMNS, HEART_RATE_COLUMNS, PATIENT_COLUMNS, blood_pressure_reading,
    heart_rate_reading, patient_record,
};

type RowMapper<T> = fn(&Row) -> Result<T, tokio_postgres::Error>;

type Params<'a> = &'a [&'a (dyn ToSql + Sync)];

impl PostgresBackend {
    /// Runs a single-row query, returning `None` when no row matches.
    async fn query_optional<T>(
        &self,
        table: &str,
        sql: &str,
        params: Params<'_>,
        map: RowMapper<T>,
    ) -> StorageResult<Option<T>> {
        let client = self.get_client().await?;
        let row = client
            .query_opt(sql, params)
            .await
            .map_err(|e| BackendError::from_postgres_query(table, e))?;
        row.as_ref()
            .map(map)
            .transpose()
            .map_err(|e| BackendError::from_postgres_row(table, e).into())
    }

    /// Runs a query and maps every row; one bad row fails the whole query.
    async fn query_list<T>(
        &self,
        table: &str,
        sql: &str,
        params: Params<'_>,
        map: RowMapper<T>,
    ) -> StorageResult<Vec<T>> {
        let client = self.get_client().await?;
        let rows = client
            .query(sql, params)
            .await
            .map_err(|e| BackendError::from_postgres_query(table, e))?;
        let items = rows
            .iter()
            .map(map)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| BackendError::from_postgres_row(table, e))?;
        trace!(table, count = items.len(), "Mapped rows");
        Ok(items)
    }

    async fn reading_by_id(&self, id: i64) -> StorageResult<Option<ClinicalObservation>> {
        let blood_pressure = self
            .query_optional(
                "blood_pressure",
                &format!(
                    "SELECT {BLOOD_PRESSURE_COLUMNS} FROM blood_pressure WHERE id = $1::int8"
                ),
                &[&id],
                blood_pressure_reading,
            )
            .await?;
        if blood_pressure.is_some() {
            return Ok(blood_pressure);
        }
        self.query_optional(
            "heart_rate",
            &format!("SELECT {HEART_RATE_COLUMNS} FROM heart_rate WHERE id = $1::int8"),
            &[&id],
            heart_rate_reading,
        )
        .await
    }

    /// Blood pressure readings followed by heart rate readings, filtered by
    /// `WHERE patient_id = $1` when a patient is given.
    async fn readings(&self, patient_id: Option<i64>) -> StorageResult<Vec<ClinicalObservation>> {
        let (filter, params): (&str, Vec<&(dyn ToSql + Sync)>) = match &patient_id {
            Some(id) => (
                " WHERE patient_id = $1::int8",
                vec![id as &(dyn ToSql + Sync)],
            ),
            None => ("", Vec::new()),
        };

        let mut readings = self
            .query_list(
                "blood_pressure",
                &format!("SELECT {BLOOD_PRESSURE_COLUMNS} FROM blood_pressure{filter}"),
                &params,
                blood_pressure_reading,
            )
            .await?;
        readings.extend(
            self.query_list(
                "heart_rate",
                &format!("SELECT {HEART_RATE_COLUMNS} FROM heart_rate{filter}"),
                &params,
                heart_rate_reading,
            )
            .await?,
        );
        Ok(readings)
    }
}

impl ClinicalStorage for PostgresBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn read_patient(&self, id: i64) -> StorageResult<Patient> {
        let record = self
            .block_on(self.query_optional(
                "patients",
                &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1::int8"),
                &[&id],
                patient_record,
            ))?
            .ok_or_else(|| StorageError::not_found("Patient", id))?;
        patient_from(record)
    }

    fn read_observation(&self, id: i64) -> StorageResult<Observation> {
        match self.block_on(self.reading_by_id(id))? {
            Some(reading) => observation_from(reading),
            None => {
                debug!(id, "No blood pressure or heart rate reading with id");
                Err(StorageError::not_found("Observation", id))
            }
        }
    }

    fn observations_by_subject(&self, patient_id: i64) -> StorageResult<Vec<Observation>> {
        let readings = self.block_on(self.readings(Some(patient_id)))?;
        debug!(patient_id, count = readings.len(), "Subject search");
        observations_from(readings)
    }

    fn all_patients(&self) -> StorageResult<Vec<Patient>> {
        patients_from(self.block_on(self.query_list(
            "patients",
            &format!("SELECT {PATIENT_COLUMNS} FROM patients"),
            &[],
            patient_record,
        ))?)
    }

    fn all_observations(&self) -> StorageResult<Vec<Observation>> {
        observations_from(self.block_on(self.readings(None))?)
    }

    fn health_check(&self) -> StorageResult<()> {
        self.block_on(self.ping())
    }
}
