//! Handler for requests outside the served routes.

use axum::http::Uri;
use tracing::debug;

use crate::error::RestError;

/// Answers any unmatched path with a `not-supported` OperationOutcome.
pub async fn fallback_handler(uri: Uri) -> RestError {
    debug!(path = %uri.path(), "No route for request");
    RestError::UnsupportedPath {
        path: uri.path().to_string(),
    }
}
