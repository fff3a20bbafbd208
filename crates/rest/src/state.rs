//! Application state for the FHIR REST API.
//!
//! Holds the storage backend and configuration shared by every handler.

use std::sync::Arc;

use vitalis_persistence::ClinicalStorage;

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The storage backend type (must implement [`ClinicalStorage`])
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use vitalis_persistence::backends::sqlite::SqliteBackend;
/// use vitalis_rest::{AppState, ServerConfig};
///
/// let backend = SqliteBackend::in_memory().unwrap();
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// assert_eq!(state.base_url(), "http://localhost:8080");
/// ```
pub struct AppState<S> {
    /// The storage backend.
    storage: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// S sits behind an Arc and need not be Clone itself
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: ClinicalStorage> AppState<S> {
    /// Creates a new AppState with the given storage and configuration.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        Self {
            storage,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a clone of the storage Arc.
    pub fn storage_arc(&self) -> Arc<S> {
        Arc::clone(&self.storage)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }
}
