//! # vitalis-fhir
//!
//! FHIR R4 glue for the Vitalis facade. The resource model itself comes from
//! [`helios_fhir::r4`]; this crate adds the small amount of local vocabulary
//! the facade needs on top of it:
//!
//! - [`ResourceKind`] - the resource types the facade serves
//! - [`loinc`] - the LOINC codes that tag vital-sign observations
//! - [`json`] - conversions between FHIR JSON and the typed R4 resources
//!
//! ```
//! use serde_json::json;
//! use vitalis_fhir::{ResourceKind, json};
//!
//! let patient = json::patient_from_json(json!({
//!     "resourceType": "Patient",
//!     "id": "3",
//!     "name": [{"family": "Smith", "given": ["Anna"]}],
//!     "birthDate": "1980-04-02"
//! }))
//! .unwrap();
//!
//! let resource = json::wrap_patient(patient);
//! assert_eq!(ResourceKind::of(&resource), Some(ResourceKind::Patient));
//!
//! let value = json::resource_to_json(&resource).unwrap();
//! assert_eq!(value["birthDate"], "1980-04-02");
//! ```

#![warn(missing_docs)]

pub mod json;
pub mod loinc;
pub mod resource;

pub use helios_fhir::r4;
pub use helios_fhir::r4::{Observation, Patient, Resource};
pub use json::ModelError;
pub use resource::{ResourceKind, UnknownResourceKind};

/// FHIR release implemented by this crate.
pub const FHIR_VERSION: &str = "4.0.1";
