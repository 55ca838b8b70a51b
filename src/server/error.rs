//! Mapping of domain errors to HTTP responses.
//!
//! This is the only place that decides status codes. Internal failures are
//! logged where they happen and reach the client as an opaque 500.

use crate::libs::access::AccessError;
use crate::libs::error::{FieldError, TaskError, ValidationError};
use crate::libs::messages::Message;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ApiFieldError>>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiFieldError {
    pub field: String,
    pub message: String,
}

impl From<FieldError> for ApiFieldError {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field,
            message: error.message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", Message::InternalError.to_string()),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        let details = error.errors.into_iter().map(ApiFieldError::from).collect();
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError {
                code: "VALIDATION_ERROR".to_string(),
                message: error.message,
                details: Some(details),
            },
        )
    }
}

impl From<TaskError> for ApiErrorResponse {
    fn from(error: TaskError) -> Self {
        match error {
            TaskError::NotFound => Self::not_found(Message::TaskNotFound.to_string()),
            TaskError::StatusUnconfirmed(id) => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("STATUS_UNCONFIRMED", Message::TaskStatusUnconfirmed(id).to_string()),
            ),
            TaskError::Database(_) => Self::internal_error(),
        }
    }
}

impl From<AccessError> for ApiErrorResponse {
    fn from(error: AccessError) -> Self {
        match error {
            AccessError::InvalidId(_) => Self::bad_request(error.to_string()),
            AccessError::NotFound => Self::not_found(Message::TaskNotFound.to_string()),
            AccessError::Forbidden => Self::forbidden(Message::TaskAccessDenied.to_string()),
            AccessError::Lookup(inner) => inner.into(),
        }
    }
}
