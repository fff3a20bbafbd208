//! Error types for the persistence layer.
//!
//! Lookups fail in one of three observably different ways, and each has its
//! own category so callers never confuse them:
//!
//! - [`ResourceError::NotFound`]: the id exists in no backing table.
//! - [`ValidationError`]: the caller supplied a selector that cannot be
//!   used (non-numeric id, malformed subject reference, unsupported search).
//!   These are raised before any query runs.
//! - [`BackendError`]: the query, the connection, or the row mapping failed.
//!   Never reported as "not found" or as an empty result.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;
use vitalis_fhir::ModelError;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Resource state errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Caller errors detected before querying
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Data access failures
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true if the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Resource(ResourceError::NotFound { .. }))
    }

    /// Returns true if this is a query, connection or row-mapping failure.
    pub fn is_data_access_failure(&self) -> bool {
        matches!(self, StorageError::Backend(_))
    }
}

/// Errors related to resource state.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("resource not found: {resource_type}/{id}")]
    NotFound { resource_type: String, id: String },
}

/// Errors in the request's selectors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An identifier or search value cannot be parsed as the expected type.
    #[error("invalid value '{value}' for {parameter}: {message}")]
    InvalidSelector {
        parameter: String,
        value: String,
        message: String,
    },

    /// The resource type is not served.
    #[error("unsupported resource type: {resource_type}")]
    UnsupportedResourceType { resource_type: String },

    /// The resource type has no such search parameter.
    #[error("unsupported search parameter '{parameter}' for {resource_type}")]
    UnsupportedSearchParameter {
        resource_type: String,
        parameter: String,
    },
}

/// Errors originating from the database backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Every pooled connection stayed in use for the whole checkout timeout.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Query execution error.
    #[error("query on {table} failed: {message}")]
    QueryError {
        table: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A row could not be mapped to a resource (missing column, NULL in a
    /// required column, unparsable value).
    #[error("failed to map row from {table}: {message}")]
    RowMapping { table: String, message: String },

    /// Schema creation error.
    #[error("schema initialization failed: {message}")]
    SchemaError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Builds a NotFound error.
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        StorageError::Resource(ResourceError::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        })
    }
}

impl BackendError {
    /// A row whose values the R4 model rejects is a row-mapping failure.
    pub(crate) fn from_model(table: &str, err: ModelError) -> Self {
        BackendError::RowMapping {
            table: table.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "sqlite")]
impl BackendError {
    /// Classifies a rusqlite error raised while querying `table`.
    ///
    /// Column access and conversion failures are row-mapping errors; anything
    /// else is a query error.
    pub(crate) fn from_sqlite(table: &str, err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::InvalidColumnName(_)
            | rusqlite::Error::InvalidColumnIndex(_)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => BackendError::RowMapping {
                table: table.to_string(),
                message: err.to_string(),
            },
            other => BackendError::QueryError {
                table: table.to_string(),
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

#[cfg(feature = "postgres")]
impl BackendError {
    /// A failed statement on `table`.
    pub(crate) fn from_postgres_query(table: &str, err: tokio_postgres::Error) -> Self {
        BackendError::QueryError {
            table: table.to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// A row of `table` whose columns could not be read.
    pub(crate) fn from_postgres_row(table: &str, err: tokio_postgres::Error) -> Self {
        BackendError::RowMapping {
            table: table.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::not_found("Patient", 123);
        assert_eq!(err.to_string(), "resource not found: Patient/123");
        assert!(err.is_not_found());
        assert!(!err.is_data_access_failure());
    }

    #[test]
    fn test_invalid_selector_display() {
        let err = ValidationError::InvalidSelector {
            parameter: "id".to_string(),
            value: "abc".to_string(),
            message: "expected an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for id: expected an integer"
        );
    }

    #[test]
    fn test_backend_error_is_data_access_failure() {
        let err: StorageError = BackendError::RowMapping {
            table: "heart_rate".to_string(),
            message: "Invalid column type Null at index: 2, name: rate".to_string(),
        }
        .into();
        assert!(err.is_data_access_failure());
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("heart_rate"));
    }

    #[test]
    fn test_model_rejection_is_row_mapping() {
        let rejected = vitalis_fhir::json::patient_from_json(serde_json::json!({
            "resourceType": "Unknown",
            "id": "1"
        }))
        .unwrap_err();

        let err = BackendError::from_model("patients", rejected);
        assert!(matches!(err, BackendError::RowMapping { ref table, .. } if table == "patients"));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_from_sqlite_classification() {
        let mapping = BackendError::from_sqlite(
            "patients",
            rusqlite::Error::InvalidColumnName("first_name".to_string()),
        );
        assert!(matches!(mapping, BackendError::RowMapping { .. }));

        let query = BackendError::from_sqlite(
            "patients",
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some("no such table: patients".to_string()),
            ),
        );
        assert!(matches!(query, BackendError::QueryError { .. }));
    }
}
