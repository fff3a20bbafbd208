//! Resource kinds served by the facade.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use helios_fhir::r4::Resource;

/// The resource types this facade exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// `Patient`
    Patient,
    /// `Observation`
    Observation,
}

impl ResourceKind {
    /// All supported kinds, in CapabilityStatement order.
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Patient, ResourceKind::Observation];

    /// Returns the FHIR resource type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "Patient",
            ResourceKind::Observation => "Observation",
        }
    }

    /// Returns the kind of an R4 resource, or `None` for types the facade
    /// never serves.
    pub fn of(resource: &Resource) -> Option<ResourceKind> {
        match resource {
            Resource::Patient(_) => Some(ResourceKind::Patient),
            Resource::Observation(_) => Some(ResourceKind::Observation),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a resource type name is not one this facade serves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resource type: {0}")]
pub struct UnknownResourceKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResourceKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Resource type names are case-sensitive in FHIR URLs.
        match s {
            "Patient" => Ok(ResourceKind::Patient),
            "Observation" => Ok(ResourceKind::Observation),
            other => Err(UnknownResourceKind(other.to_string())),
        }
    }
}
