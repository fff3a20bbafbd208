//! Clinical table fixtures.
//!
//! The dataset deliberately contains an id shared by a blood pressure and a
//! heart rate reading (5), a patient without a birth date (2), and a patient
//! with no readings at all (4).

#![allow(dead_code)]

#[cfg(feature = "sqlite")]
use vitalis_persistence::backends::sqlite::SqliteBackend;

pub const PATIENTS: &str = "
    INSERT INTO patients (id, first_name, last_name, date_of_birth) VALUES
        (1, 'Jane', 'Doe', '1970-02-14'),
        (2, 'John', 'Roe', NULL),
        (3, 'Ada', 'Lovelace', '1815-12-10'),
        (4, 'Alan', 'Turing', '1912-06-23');
";

pub const BLOOD_PRESSURE: &str = "
    INSERT INTO blood_pressure (id, patient_id, systolic, diastolic, date) VALUES
        (7, 3, 120, 80, '2024-01-05'),
        (8, 1, 130, 85, '2024-02-01'),
        (5, 3, 118, 76, '2024-02-10');
";

pub const HEART_RATE: &str = "
    INSERT INTO heart_rate (id, patient_id, rate, date) VALUES
        (11, 3, 72, '2024-01-05'),
        (5, 1, 64, '2024-03-01'),
        (12, 3, 80, '2024-02-10');
";

pub const PATIENT_COUNT: usize = 4;
pub const BLOOD_PRESSURE_COUNT: usize = 3;
pub const HEART_RATE_COUNT: usize = 3;

/// Runs a SQL batch on a pooled connection.
#[cfg(feature = "sqlite")]
pub fn seed(backend: &SqliteBackend, sql: &str) {
    backend
        .get_connection()
        .expect("Failed to get connection")
        .execute_batch(sql)
        .expect("Failed to seed data");
}

/// An in-memory backend with the clinical schema and no rows.
#[cfg(feature = "sqlite")]
pub fn empty_backend() -> SqliteBackend {
    let backend = SqliteBackend::in_memory().expect("Failed to create SQLite backend");
    backend.init_schema().expect("Failed to initialize schema");
    backend
}

/// An in-memory backend loaded with the standard fixtures.
#[cfg(feature = "sqlite")]
pub fn seeded_backend() -> SqliteBackend {
    let backend = empty_backend();
    seed(&backend, PATIENTS);
    seed(&backend, BLOOD_PRESSURE);
    seed(&backend, HEART_RATE);
    backend
}
