//! Core lookup traits and the resource registry.
//!
//! - [`ClinicalStorage`] - read-only lookups over the clinical tables
//! - [`registry`] - the static kind to entry-point table, and the
//!   kind-generic operations built on it
//!
//! # Example
//!
//! ```ignore
//! use vitalis_fhir::ResourceKind;
//! use vitalis_persistence::core::registry;
//!
//! let resource = registry::read_by_id(&backend, ResourceKind::Observation, "7")?;
//! assert_eq!(ResourceKind::of(&resource), Some(ResourceKind::Observation));
//! ```

pub mod registry;
pub mod storage;

pub use registry::{ResourceEntry, SearchParamInfo};
pub use storage::ClinicalStorage;
