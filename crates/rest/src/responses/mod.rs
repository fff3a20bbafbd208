//! Response formatting for the FHIR REST API.
//!
//! - [`operation_outcome`] - OperationOutcome generation
//! - [`bundle`] - searchset Bundle building
//! - [`format`] - `_format` negotiation
//! - [`headers`] - FHIR JSON content type

pub mod bundle;
pub mod format;
pub mod headers;
pub mod operation_outcome;

pub use bundle::BundleBuilder;
pub use format::negotiate_format;
pub use headers::fhir_json_response;
