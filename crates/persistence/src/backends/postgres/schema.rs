//! PostgreSQL schema for the clinical tables.
//!
//! Column types follow the source system: `INTEGER` keys and values and
//! `DATE` columns. Bootstrapping only creates missing tables.

use deadpool_postgres::Client;

use crate::backends::TABLES;
use crate::error::{BackendError, StorageResult};

/// Creates the clinical tables and their subject indexes if they do not exist.
pub async fn initialize_schema(client: &Client) -> StorageResult<()> {
    let tables = [
        "CREATE TABLE IF NOT EXISTS patients (
            id INTEGER PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            date_of_birth DATE
        )",
        "CREATE TABLE IF NOT EXISTS blood_pressure (
            id INTEGER PRIMARY KEY,
            patient_id INTEGER NOT NULL,
            systolic INTEGER NOT NULL,
            diastolic INTEGER NOT NULL,
            date DATE NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS heart_rate (
            id INTEGER PRIMARY KEY,
            patient_id INTEGER NOT NULL,
            rate INTEGER NOT NULL,
            date DATE NOT NULL
        )",
    ];

    for (name, sql) in TABLES.iter().zip(tables) {
        client
            .batch_execute(sql)
            .await
            .map_err(|e| BackendError::SchemaError {
                message: format!("Failed to create {} table: {}", name, e),
            })?;
    }

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_blood_pressure_patient ON blood_pressure(patient_id)",
        "CREATE INDEX IF NOT EXISTS idx_heart_rate_patient ON heart_rate(patient_id)",
    ];
    for index_sql in indexes {
        client
            .batch_execute(index_sql)
            .await
            .map_err(|e| BackendError::SchemaError {
                message: format!("Failed to create index: {}", e),
            })?;
    }

    tracing::debug!("Clinical schema ready");
    Ok(())
}
