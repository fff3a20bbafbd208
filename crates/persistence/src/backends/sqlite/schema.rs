//! SQLite schema for the clinical tables.
//!
//! The facade never writes to these tables. Bootstrapping only creates them
//! when missing, for development databases and tests.

use rusqlite::Connection;

pub use crate::backends::TABLES;
use crate::error::{BackendError, StorageResult};

/// Creates the clinical tables and their subject indexes if they do not exist.
pub fn initialize_schema(conn: &Connection) -> StorageResult<()> {
    create_tables(conn)?;
    create_indexes(conn)?;
    tracing::debug!("Clinical schema ready");
    Ok(())
}

fn create_tables(conn: &Connection) -> StorageResult<()> {
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
        conn.execute(sql, []).map_err(|e| BackendError::SchemaError {
            message: format!("Failed to create {} table: {}", name, e),
        })?;
    }

    Ok(())
}

fn create_indexes(conn: &Connection) -> StorageResult<()> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_blood_pressure_patient ON blood_pressure(patient_id)",
        "CREATE INDEX IF NOT EXISTS idx_heart_rate_patient ON heart_rate(patient_id)",
    ];

    for index_sql in &indexes {
        conn.execute(index_sql, []).map_err(|e| BackendError::SchemaError {
            message: format!("Failed to create index: {}", e),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn test_schema_creation() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        for table in TABLES {
            assert!(table_exists(&conn, table), "missing table {table}");
        }
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO patients (id, first_name, last_name) VALUES (1, 'Jane', 'Doe')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_required_columns_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO heart_rate (id, patient_id, rate, date) VALUES (1, 1, NULL, '2024-01-01')",
            [],
        );
        assert!(result.is_err());
    }
}
