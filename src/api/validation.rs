use serde_json::Value;
use url::Url;

use crate::models::{SummaryPayload, SummaryUpdatePayload};

use super::error::FieldError;

/// Validate a create body: `url` is required and must be an http(s) URL.
pub fn validate_create(body: &Value) -> Result<SummaryPayload, Vec<FieldError>> {
    let mut errors = Vec::new();
    let url = validate_url_field(body, &mut errors);

    match url {
        Some(url) if errors.is_empty() => Ok(SummaryPayload { url }),
        _ => Err(errors),
    }
}

/// Validate an update body: both `url` and `summary` are required.
/// Violations are collected per field, in declaration order.
pub fn validate_update(body: &Value) -> Result<SummaryUpdatePayload, Vec<FieldError>> {
    let mut errors = Vec::new();
    let url = validate_url_field(body, &mut errors);
    let summary = validate_string_field(body, "summary", &mut errors);

    match (url, summary) {
        (Some(url), Some(summary)) if errors.is_empty() => {
            Ok(SummaryUpdatePayload { url, summary })
        }
        _ => Err(errors),
    }
}

/// Validate the `{id}` path segment: a positive integer, checked before any
/// store access.
pub fn validate_summary_id(raw: &str) -> Result<i64, Vec<FieldError>> {
    let id: i64 = raw
        .parse()
        .map_err(|_| vec![FieldError::int_parsing(raw)])?;
    if id <= 0 {
        return Err(vec![FieldError::greater_than(raw, 0)]);
    }
    Ok(id)
}

fn validate_url_field(body: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    let raw = match validate_string_field(body, "url", errors) {
        Some(raw) => raw,
        None => return None,
    };

    match Url::parse(&raw) {
        // Url::parse lowercases the scheme, so the check is case-insensitive
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Some(url.to_string())
        }
        Ok(_) => {
            errors.push(FieldError::url_scheme("url", &raw));
            None
        }
        Err(_) => {
            errors.push(FieldError::url_parsing("url", &raw));
            None
        }
    }
}

fn validate_string_field(
    body: &Value,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::missing(field, body));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::string_type(field, other));
            None
        }
    }
}
