//! SQLite backend implementation.
//!
//! Serves the clinical lookups from a pooled SQLite database. Supports both
//! in-memory databases (for tests) and file-based databases.
//!
//! # Example
//!
//! ```no_run
//! use vitalis_persistence::backends::sqlite::SqliteBackend;
//! use vitalis_persistence::core::ClinicalStorage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("./clinical.db")?;
//!
//! let _patient = backend.read_patient(3)?;
//! let readings = backend.observations_by_subject(3)?;
//! println!("Patient/3 has {} readings", readings.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE patients (
//!     id INTEGER PRIMARY KEY,
//!     first_name TEXT NOT NULL,
//!     last_name TEXT NOT NULL,
//!     date_of_birth DATE              -- YYYY-MM-DD, nullable
//! );
//!
//! CREATE TABLE blood_pressure (
//!     id INTEGER PRIMARY KEY,
//!     patient_id INTEGER NOT NULL,
//!     systolic INTEGER NOT NULL,
//!     diastolic INTEGER NOT NULL,
//!     date DATE NOT NULL
//! );
//!
//! CREATE TABLE heart_rate (
//!     id INTEGER PRIMARY KEY,
//!     patient_id INTEGER NOT NULL,
//!     rate INTEGER NOT NULL,
//!     date DATE NOT NULL
//! );
//! ```

mod backend;
pub mod mapper;
mod schema;
mod storage;

pub use backend::{SqliteBackend, SqliteBackendConfig};
pub use schema::{TABLES, initialize_schema};
