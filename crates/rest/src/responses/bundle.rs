//! Bundle response building.
//!
//! Searches return a single-page `searchset` Bundle: every match, a `total`,
//! and a `self` link. There are no paging links.

use serde_json::Value;
use vitalis_fhir::Resource;
use vitalis_fhir::json::resource_to_json;

use crate::error::{RestError, RestResult};

/// A link in a Bundle.
#[derive(Debug, Clone)]
pub struct BundleLink {
    /// The relation type.
    pub relation: String,
    /// The URL.
    pub url: String,
}

impl BundleLink {
    /// Creates a self link.
    pub fn self_link(url: impl Into<String>) -> Self {
        Self {
            relation: "self".to_string(),
            url: url.into(),
        }
    }

    /// Converts to FHIR JSON.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "relation": self.relation,
            "url": self.url
        })
    }
}

/// A search match in a Bundle.
#[derive(Debug, Clone)]
pub struct BundleEntry {
    /// Full URL of the resource.
    pub full_url: String,
    /// The resource itself.
    pub resource: Value,
}

impl BundleEntry {
    /// Creates a search match entry for a resource served from `base_url`.
    ///
    /// The `fullUrl` is `[base]/[resourceType]/[id]`.
    pub fn search_match(resource: &Resource, base_url: &str) -> RestResult<Self> {
        let resource = resource_to_json(resource)?;
        let full_url = match (resource["resourceType"].as_str(), resource["id"].as_str()) {
            (Some(resource_type), Some(id)) => format!("{}/{}/{}", base_url, resource_type, id),
            _ => {
                return Err(RestError::InternalError {
                    message: "Search match has no resource type or id".to_string(),
                });
            }
        };
        Ok(Self { full_url, resource })
    }

    /// Converts to FHIR JSON.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "fullUrl": self.full_url,
            "resource": self.resource,
            "search": {
                "mode": "match"
            }
        })
    }
}

/// Builder for searchset Bundle resources.
#[derive(Debug, Default)]
pub struct BundleBuilder {
    links: Vec<BundleLink>,
    entries: Vec<BundleEntry>,
    timestamp: Option<String>,
}

impl BundleBuilder {
    /// Creates a searchset bundle builder.
    pub fn searchset() -> Self {
        Self::default()
    }

    /// Adds a self link.
    pub fn self_link(mut self, url: impl Into<String>) -> Self {
        self.links.push(BundleLink::self_link(url));
        self
    }

    /// Adds one match entry per resource, preserving order.
    pub fn add_matches(mut self, resources: &[Resource], base_url: &str) -> RestResult<Self> {
        for resource in resources {
            self.entries.push(BundleEntry::search_match(resource, base_url)?);
        }
        Ok(self)
    }

    /// Sets the timestamp.
    pub fn timestamp(mut self, ts: impl Into<String>) -> Self {
        self.timestamp = Some(ts.into());
        self
    }

    /// Builds the Bundle resource.
    ///
    /// `total` is the number of entries, since the page holds every match.
    pub fn build(self) -> Value {
        let mut bundle = serde_json::json!({
            "resourceType": "Bundle",
            "type": "searchset",
            "total": self.entries.len()
        });

        if let Some(ts) = self.timestamp {
            bundle["timestamp"] = serde_json::json!(ts);
        }

        if !self.links.is_empty() {
            bundle["link"] =
                serde_json::json!(self.links.iter().map(|l| l.to_json()).collect::<Vec<_>>());
        }

        if !self.entries.is_empty() {
            bundle["entry"] = serde_json::json!(
                self.entries
                    .iter()
                    .map(|e| e.to_json())
                    .collect::<Vec<_>>()
            );
        }

        bundle
    }
}
