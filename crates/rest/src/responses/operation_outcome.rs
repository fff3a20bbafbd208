//! OperationOutcome response generation.
//!
//! Every issue this server reports is an error; the severity is fixed.

use serde_json::Value;

/// Issue type codes used by this server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    /// Invalid content.
    Invalid,
    /// Resource not found.
    NotFound,
    /// Not supported.
    NotSupported,
    /// Unexpected internal failure.
    Exception,
}

impl IssueType {
    /// Returns the FHIR code string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Invalid => "invalid",
            IssueType::NotFound => "not-found",
            IssueType::NotSupported => "not-supported",
            IssueType::Exception => "exception",
        }
    }
}

/// An error issue in an OperationOutcome.
#[derive(Debug, Clone)]
pub struct Issue {
    /// The type/code of the issue.
    pub code: IssueType,
    /// Human-readable description.
    pub details: String,
}

impl Issue {
    /// Creates an error issue.
    pub fn error(code: IssueType, details: impl Into<String>) -> Self {
        Self {
            code,
            details: details.into(),
        }
    }

    /// Converts to FHIR JSON.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "severity": "error",
            "code": self.code.as_str(),
            "details": {
                "text": self.details
            }
        })
    }
}

/// Builder for OperationOutcome resources.
#[derive(Debug, Default)]
pub struct OperationOutcomeBuilder {
    issues: Vec<Issue>,
}

impl OperationOutcomeBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error issue.
    pub fn error(mut self, code: IssueType, details: impl Into<String>) -> Self {
        self.issues.push(Issue::error(code, details));
        self
    }

    /// Builds the OperationOutcome resource.
    pub fn build(self) -> Value {
        let issues: Vec<Value> = self.issues.iter().map(Issue::to_json).collect();

        serde_json::json!({
            "resourceType": "OperationOutcome",
            "issue": issues
        })
    }
}

/// Creates a simple error OperationOutcome.
pub fn error_outcome(code: IssueType, message: &str) -> Value {
    OperationOutcomeBuilder::new().error(code, message).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_to_json() {
        let issue = Issue::error(IssueType::NotFound, "Resource not found");
        let json = issue.to_json();

        assert_eq!(json["severity"], "error");
        assert_eq!(json["code"], "not-found");
        assert_eq!(json["details"]["text"], "Resource not found");
        assert!(json.get("expression").is_none());
    }

    #[test]
    fn test_builder_keeps_issue_order() {
        let outcome = OperationOutcomeBuilder::new()
            .error(IssueType::Invalid, "first")
            .error(IssueType::NotSupported, "second")
            .build();

        assert_eq!(outcome["issue"][0]["details"]["text"], "first");
        assert_eq!(outcome["issue"][1]["code"], "not-supported");
    }

    #[test]
    fn test_error_outcome() {
        let outcome = error_outcome(IssueType::Exception, "database unavailable");

        assert_eq!(outcome["resourceType"], "OperationOutcome");
        assert_eq!(outcome["issue"].as_array().unwrap().len(), 1);
        assert_eq!(outcome["issue"][0]["code"], "exception");
    }
}
