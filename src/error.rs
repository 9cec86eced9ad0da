use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::query::ValidationErrors;
use crate::upstream::UpstreamError;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    UpstreamSchema(String),
    BadGateway(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Invalid query parameters: {errors}"),
            AppError::UpstreamSchema(msg) => write!(f, "Upstream schema error: {msg}"),
            AppError::BadGateway(msg) => write!(f, "Bad Gateway: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!("Rejected query: {errors}");
                let body = json!({
                    "error": "Invalid query parameters",
                    "issues": errors.issues,
                });
                (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
            }
            AppError::UpstreamSchema(details) => {
                tracing::error!("Upstream schema error: {details}");
                let body = json!({
                    "error": "Upstream response did not match the expected shape",
                    "details": details,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
            AppError::BadGateway(msg) => {
                tracing::error!("Upstream failure: {msg}");
                let body = json!({ "error": "Failed to fetch submissions from the forms API" });
                (StatusCode::BAD_GATEWAY, axum::Json(body)).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Schema(msg) => AppError::UpstreamSchema(msg),
            other => AppError::BadGateway(other.to_string()),
        }
    }
}
