//! Vitalis Persistence Layer
//!
//! Read-only lookups over a small clinical SQL dataset (patients, blood
//! pressure readings, heart rate readings), returning the rows as FHIR
//! [`Patient`](vitalis_fhir::Patient) and [`Observation`](vitalis_fhir::Observation)
//! resources.
//!
//! # Architecture
//!
//! - [`types`] - Source records and selector parsing
//! - [`error`] - Error types for all operations
//! - [`core`] - The [`ClinicalStorage`] lookup trait and the resource registry
//! - [`backends`] - Backend implementations (SQLite, PostgreSQL)
//!
//! # Quick Start
//!
//! ```no_run
//! use vitalis_fhir::ResourceKind;
//! use vitalis_persistence::backends::sqlite::SqliteBackend;
//! use vitalis_persistence::core::registry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SqliteBackend::open("clinical.db")?;
//!
//! // Kind-generic lookups parse raw selectors and dispatch through the registry
//! let obs = registry::read_by_id(&backend, ResourceKind::Observation, "7")?;
//! let vitals = registry::search_by_subject(&backend, ResourceKind::Observation, "Patient/3")?;
//!
//! let json = vitalis_fhir::json::resource_to_json(&obs)?;
//! println!("Observation/{} and {} more", json["id"], vitals.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Backend Features
//!
//! - `sqlite` (default) - SQLite with in-memory and file modes
//! - `postgres` - PostgreSQL via deadpool-postgres

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{StorageError, StorageResult};

// Re-export core traits
pub use core::{ClinicalStorage, ResourceEntry};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
