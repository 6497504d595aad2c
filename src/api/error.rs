use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::AppError;

/// A single structured validation failure, in the shape clients see:
/// `{type, loc, msg, input, [ctx]}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    pub fn missing(field: &str, input: &Value) -> Self {
        Self {
            kind: "missing",
            loc: vec!["body".to_string(), field.to_string()],
            msg: "Field required".to_string(),
            input: input.clone(),
            ctx: None,
        }
    }

    pub fn string_type(field: &str, input: &Value) -> Self {
        Self {
            kind: "string_type",
            loc: vec!["body".to_string(), field.to_string()],
            msg: "Input should be a valid string".to_string(),
            input: input.clone(),
            ctx: None,
        }
    }

    pub fn url_parsing(field: &str, input: &str) -> Self {
        Self {
            kind: "url_parsing",
            loc: vec!["body".to_string(), field.to_string()],
            msg: "Input should be a valid URL".to_string(),
            input: Value::String(input.to_string()),
            ctx: None,
        }
    }

    pub fn url_scheme(field: &str, input: &str) -> Self {
        Self {
            kind: "url_scheme",
            loc: vec!["body".to_string(), field.to_string()],
            msg: "URL scheme should be 'http' or 'https'".to_string(),
            input: Value::String(input.to_string()),
            ctx: None,
        }
    }

    pub fn greater_than(raw: &str, gt: i64) -> Self {
        Self {
            kind: "greater_than",
            loc: vec!["path".to_string(), "id".to_string()],
            msg: format!("Input should be greater than {}", gt),
            input: Value::String(raw.to_string()),
            ctx: Some(json!({ "gt": gt })),
        }
    }

    pub fn int_parsing(raw: &str) -> Self {
        Self {
            kind: "int_parsing",
            loc: vec!["path".to_string(), "id".to_string()],
            msg: "Input should be a valid integer, unable to parse string as an integer"
                .to_string(),
            input: Value::String(raw.to_string()),
            ctx: None,
        }
    }

    pub fn json_invalid(msg: String) -> Self {
        Self {
            kind: "json_invalid",
            loc: vec!["body".to_string()],
            msg,
            input: Value::Null,
            ctx: None,
        }
    }
}

/// Error contract of the HTTP surface. Everything a handler can fail with
/// maps onto one of these, and from there onto a `{"detail": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input, all violations collected. 422.
    Validation(Vec<FieldError>),
    /// The target record does not exist. 404.
    NotFound,
    /// Underlying store or infrastructure failure. 500.
    Internal(AppError),
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError::Internal(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![FieldError::json_invalid(rejection.body_text())])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": errors })),
            )
                .into_response(),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": "Summary not found" })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}
