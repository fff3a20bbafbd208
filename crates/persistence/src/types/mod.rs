//! Core types for the persistence layer.
//!
//! - [`PatientRecord`], [`BloodPressureRecord`], [`HeartRateRecord`] - rows of
//!   the clinical tables
//! - [`ClinicalObservation`] - the two observation tables as one tagged union
//! - [`selector`] - parsing of ids and subject references
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use vitalis_persistence::types::{ClinicalObservation, HeartRateRecord};
//!
//! let reading = ClinicalObservation::from(HeartRateRecord {
//!     id: 11,
//!     patient_id: 3,
//!     rate: 72,
//!     date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
//! });
//!
//! let json = reading.to_fhir_json();
//! assert_eq!(json["subject"]["reference"], "Patient/3");
//! assert_eq!(json["valueQuantity"]["unit"], "bpm");
//!
//! // The same shape, checked by the R4 model.
//! let observation = reading.into_observation().unwrap();
//! # let _ = observation;
//! ```

mod clinical;
mod records;
pub mod selector;

pub use clinical::ClinicalObservation;
pub(crate) use clinical::{observation_from, observations_from};
pub use records::{BloodPressureRecord, HeartRateRecord, PatientRecord};
pub(crate) use records::{patient_from, patients_from};
pub use selector::{parse_resource_id, parse_subject_reference};
