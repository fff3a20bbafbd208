//! Error types for the FHIR REST API.
//!
//! Every error leaves the server as a FHIR OperationOutcome with a matching
//! HTTP status code.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | FHIR Issue Code |
//! |--------------|-------------|-----------------|
//! | NotFound | 404 | not-found |
//! | InvalidSelector | 400 | invalid |
//! | UnsupportedSearchParameter | 400 | not-supported |
//! | UnsupportedResourceType | 404 | not-supported |
//! | BackendError | 500 | exception |
//!
//! Malformed path segments and query strings are answered as 400 `invalid`,
//! and a `_format` other than JSON as 406 `not-supported`.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};
use vitalis_fhir::ModelError;
use vitalis_persistence::error::{ResourceError, StorageError, ValidationError};

use crate::responses::headers::fhir_json_response;
use crate::responses::operation_outcome::{IssueType, error_outcome};

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// Resource not found (HTTP 404).
    #[error("Resource not found: {resource_type}/{id}")]
    NotFound {
        /// The resource type (e.g., "Patient").
        resource_type: String,
        /// The resource ID.
        id: String,
    },

    /// The resource type is not served (HTTP 404).
    #[error("Unsupported resource type: {resource_type}")]
    UnsupportedResourceType {
        /// The requested type.
        resource_type: String,
    },

    /// The resource type has no such search parameter (HTTP 400).
    #[error("Unsupported search parameter '{parameter}' for {resource_type}")]
    UnsupportedSearchParameter {
        /// The resource type searched.
        resource_type: String,
        /// The offending parameter name.
        parameter: String,
    },

    /// Bad request - malformed selector (HTTP 400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The requested `_format` is not served (HTTP 406).
    #[error("Not acceptable: {message}")]
    NotAcceptable {
        /// Error message.
        message: String,
    },

    /// No route matches the request path (HTTP 404).
    #[error("Unsupported path: {path}")]
    UnsupportedPath {
        /// The request path.
        path: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

/// Result type alias for REST handlers.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Returns the HTTP status and FHIR issue code for this error.
    pub fn status_and_code(&self) -> (StatusCode, IssueType) {
        match self {
            RestError::NotFound { .. } => (StatusCode::NOT_FOUND, IssueType::NotFound),
            RestError::UnsupportedResourceType { .. } | RestError::UnsupportedPath { .. } => {
                (StatusCode::NOT_FOUND, IssueType::NotSupported)
            }
            RestError::UnsupportedSearchParameter { .. } => {
                (StatusCode::BAD_REQUEST, IssueType::NotSupported)
            }
            RestError::BadRequest { .. } => (StatusCode::BAD_REQUEST, IssueType::Invalid),
            RestError::NotAcceptable { .. } => {
                (StatusCode::NOT_ACCEPTABLE, IssueType::NotSupported)
            }
            RestError::InternalError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, IssueType::Exception)
            }
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let details = match &self {
            RestError::NotFound { resource_type, id } => {
                format!("Resource {}/{} not found", resource_type, id)
            }
            other => other.to_string(),
        };

        fhir_json_response(status, error_outcome(code, &details))
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Resource(e) => e.into(),
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => {
                error!(error = %e, "Data access failure");
                RestError::InternalError {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl From<ResourceError> for RestError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound { resource_type, id } => {
                RestError::NotFound { resource_type, id }
            }
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidSelector { .. } => RestError::BadRequest {
                message: err.to_string(),
            },
            ValidationError::UnsupportedResourceType { resource_type } => {
                RestError::UnsupportedResourceType { resource_type }
            }
            ValidationError::UnsupportedSearchParameter {
                resource_type,
                parameter,
            } => RestError::UnsupportedSearchParameter {
                resource_type,
                parameter,
            },
        }
    }
}

impl From<PathRejection> for RestError {
    fn from(rejection: PathRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected path");
        RestError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for RestError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected query string");
        RestError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(err: ModelError) -> Self {
        error!(error = %err, "Resource serialization failed");
        RestError::InternalError {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for RestError {
    fn from(err: tokio::task::JoinError) -> Self {
        error!(error = %err, "Lookup task failed");
        RestError::InternalError {
            message: format!("Lookup task failed: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_persistence::error::BackendError;

    #[test]
    fn test_not_found_mapping() {
        let err: RestError = StorageError::not_found("Patient", 42).into();
        assert!(matches!(err, RestError::NotFound { .. }));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::NOT_FOUND, IssueType::NotFound)
        );
    }

    #[test]
    fn test_validation_mapping() {
        let invalid: RestError = StorageError::from(ValidationError::InvalidSelector {
            parameter: "subject".to_string(),
            value: "Group/1".to_string(),
            message: "subject must reference a Patient".to_string(),
        })
        .into();
        assert_eq!(
            invalid.status_and_code(),
            (StatusCode::BAD_REQUEST, IssueType::Invalid)
        );

        let unsupported: RestError = StorageError::from(ValidationError::UnsupportedSearchParameter {
            resource_type: "Patient".to_string(),
            parameter: "subject".to_string(),
        })
        .into();
        assert_eq!(
            unsupported.status_and_code(),
            (StatusCode::BAD_REQUEST, IssueType::NotSupported)
        );

        let unknown_type: RestError = StorageError::from(ValidationError::UnsupportedResourceType {
            resource_type: "Encounter".to_string(),
        })
        .into();
        assert_eq!(
            unknown_type.status_and_code(),
            (StatusCode::NOT_FOUND, IssueType::NotSupported)
        );
    }

    #[test]
    fn test_backend_error_is_internal() {
        let err: RestError = StorageError::from(BackendError::RowMapping {
            table: "blood_pressure".to_string(),
            message: "bad date".to_string(),
        })
        .into();
        assert!(matches!(err, RestError::InternalError { .. }));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, IssueType::Exception)
        );
    }

    #[test]
    fn test_not_acceptable_mapping() {
        let err = RestError::NotAcceptable {
            message: "xml".to_string(),
        };
        assert_eq!(
            err.status_and_code(),
            (StatusCode::NOT_ACCEPTABLE, IssueType::NotSupported)
        );
        assert_eq!(err.into_response().status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_into_response_status() {
        let response = RestError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()["content-type"],
            "application/fhir+json; charset=utf-8"
        );
    }
}
