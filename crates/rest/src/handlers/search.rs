//! Search interaction handler.
//!
//! Implements the FHIR [search interaction](https://hl7.org/fhir/http.html#search):
//! `GET [base]/[type]?params`
//!
//! Only a subject reference is searchable, and only on `Observation`
//! (`subject` or its alias `patient`). Without one the handler lists every
//! resource of the type. `_format` must name JSON; the other parameters
//! prefixed with `_` (`_pretty` and friends) are result-shaping flags and
//! are ignored.

use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
};
use tracing::debug;
use url::Url;
use vitalis_fhir::ResourceKind;
use vitalis_persistence::ClinicalStorage;
use vitalis_persistence::core::registry;

use crate::error::{RestError, RestResult};
use crate::handlers::run_lookup;
use crate::responses::{BundleBuilder, fhir_json_response, negotiate_format};
use crate::state::AppState;

/// Handler for type-level search.
///
/// # HTTP Request
///
/// `GET [base]/[type]?subject=Patient/123`
///
/// # Response
///
/// - `200 OK` - searchset Bundle with every match, in storage order
/// - `400 Bad Request` - unknown or repeated parameter, or a malformed reference
/// - `404 Not Found` - The type is not served
/// - `406 Not Acceptable` - `_format` asks for something other than JSON
pub async fn search_handler<S>(
    State(state): State<AppState<S>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> RestResult<Response>
where
    S: ClinicalStorage + 'static,
{
    let Path(resource_type) = path?;
    let Query(params) = query?;

    debug!(
        resource_type = %resource_type,
        params = ?params,
        "Processing search request"
    );

    negotiate_format(&params)?;
    let kind = registry::resolve_kind(&resource_type)?;
    let applied = applied_params(kind, &params)?;
    let subject = subject_param(&applied)?;

    let resources = match subject {
        Some(reference) => {
            run_lookup(&state, move |storage| {
                registry::search_by_subject(storage, kind, &reference)
            })
            .await?
        }
        None => run_lookup(&state, move |storage| registry::list_all(storage, kind)).await?,
    };

    debug!(
        resource_type = %kind,
        matches = resources.len(),
        "Search complete"
    );

    let base_url = state.base_url();
    let bundle = BundleBuilder::searchset()
        .timestamp(chrono::Utc::now().to_rfc3339())
        .self_link(self_link(base_url, kind, &applied))
        .add_matches(&resources, base_url)?
        .build();

    Ok(fhir_json_response(StatusCode::OK, bundle))
}

/// Drops `_`-prefixed flags and rejects parameters the type does not accept.
fn applied_params(
    kind: ResourceKind,
    params: &[(String, String)],
) -> RestResult<Vec<(String, String)>> {
    let entry = registry::entry(kind);
    let mut applied = Vec::new();

    for (name, value) in params {
        if name.starts_with('_') {
            continue;
        }
        if !entry.accepts_search_param(name) {
            return Err(RestError::UnsupportedSearchParameter {
                resource_type: kind.to_string(),
                parameter: name.clone(),
            });
        }
        applied.push((name.clone(), value.clone()));
    }

    Ok(applied)
}

/// Returns the single subject reference, if one was given.
///
/// Every accepted parameter names the subject, so more than one is a
/// conflicting selector.
fn subject_param(applied: &[(String, String)]) -> RestResult<Option<String>> {
    match applied {
        [] => Ok(None),
        [(_, value)] => Ok(Some(value.clone())),
        _ => Err(RestError::BadRequest {
            message: "Only one subject or patient parameter may be given".to_string(),
        }),
    }
}

fn self_link(base_url: &str, kind: ResourceKind, applied: &[(String, String)]) -> String {
    let plain = format!("{}/{}", base_url, kind);
    match Url::parse(&plain) {
        Ok(mut url) => {
            if !applied.is_empty() {
                url.query_pairs_mut().extend_pairs(applied);
            }
            url.into()
        }
        Err(_) => plain,
    }
}
