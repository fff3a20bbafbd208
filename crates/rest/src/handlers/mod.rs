//! HTTP request handlers for FHIR interactions.
//!
//! - [`read`] - Read a resource by ID
//! - [`search`] - Search by subject, or list every resource of a type
//! - [`capabilities`] - Get server capabilities (CapabilityStatement)
//! - [`health`] - Health check endpoints
//! - [`fallback`] - Requests no route matches

pub mod capabilities;
pub mod fallback;
pub mod health;
pub mod read;
pub mod search;

// Re-export handlers for convenience
pub use capabilities::capabilities_handler;
pub use fallback::fallback_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use read::read_handler;
pub use search::search_handler;

use vitalis_persistence::{ClinicalStorage, StorageResult};

use crate::error::RestResult;
use crate::state::AppState;

/// Runs a blocking lookup against the storage on tokio's blocking pool.
///
/// Pool checkout and SQLite queries block, so they never run on an async
/// worker thread.
pub(crate) async fn run_lookup<S, T, F>(state: &AppState<S>, lookup: F) -> RestResult<T>
where
    S: ClinicalStorage + 'static,
    T: Send + 'static,
    F: FnOnce(&dyn ClinicalStorage) -> StorageResult<T> + Send + 'static,
{
    let storage = state.storage_arc();
    let result = tokio::task::spawn_blocking(move || lookup(&*storage)).await?;
    Ok(result?)
}
