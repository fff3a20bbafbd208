//! Response format negotiation.
//!
//! Only JSON is produced. A `_format` query parameter asking for anything
//! else is refused with 406 rather than answered in JSON.

use crate::error::{RestError, RestResult};

/// `_format` values answered with FHIR JSON.
const JSON_FORMATS: [&str; 3] = ["json", "application/json", "application/fhir+json"];

/// Checks the `_format` parameters of a request against the JSON formats.
///
/// No `_format` at all means JSON. Matching ignores ASCII case and any media
/// type parameters such as `; charset=utf-8`.
pub fn negotiate_format(params: &[(String, String)]) -> RestResult<()> {
    for (_, value) in params.iter().filter(|(name, _)| name == "_format") {
        let media_type = value.split(';').next().unwrap_or_default().trim();
        if !JSON_FORMATS
            .iter()
            .any(|json| json.eq_ignore_ascii_case(media_type))
        {
            return Err(RestError::NotAcceptable {
                message: format!("Format '{}' is not supported; only JSON is served", value),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(value: &str) -> Vec<(String, String)> {
        vec![("_format".to_string(), value.to_string())]
    }

    #[test]
    fn test_json_formats_accepted() {
        assert!(negotiate_format(&[]).is_ok());
        assert!(negotiate_format(&format("json")).is_ok());
        assert!(negotiate_format(&format("application/json")).is_ok());
        assert!(negotiate_format(&format("application/fhir+json; charset=utf-8")).is_ok());
        assert!(negotiate_format(&format("JSON")).is_ok());
    }

    #[test]
    fn test_other_formats_refused() {
        for value in ["xml", "application/fhir+xml", "ttl", ""] {
            let err = negotiate_format(&format(value)).unwrap_err();
            assert!(matches!(err, RestError::NotAcceptable { .. }), "{value}");
        }
    }

    #[test]
    fn test_unrelated_params_ignored() {
        let params = vec![
            ("_pretty".to_string(), "true".to_string()),
            ("subject".to_string(), "xml".to_string()),
        ];
        assert!(negotiate_format(&params).is_ok());
    }
}
