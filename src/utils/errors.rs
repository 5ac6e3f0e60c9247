use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::ValidationErrors;

/// Application-wide error type. Every handler returns `Result<_, AppError>`;
/// the response body is `{"error": "..."}` with an optional `fields` map of
/// field name to messages for validation failures.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNAUTHORIZED, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::FORBIDDEN, err)
    }

    /// Build a 422 carrying the structured field -> messages map.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, errs) in errors.field_errors() {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                })
                .collect();
            fields.insert(field.to_string(), messages);
        }

        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow::anyhow!("Validation failed"),
            fields: Some(fields),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match &self.fields {
            Some(fields) => Json(json!({
                "error": self.error.to_string(),
                "fields": fields,
            })),
            None => Json(json!({
                "error": self.error.to_string()
            })),
        };

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
