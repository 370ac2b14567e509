//! # REST API Errors
//!
//! Error types for the REST API module.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::filter::FilterError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Filter could not be compiled
    #[error("{0}")]
    Filter(#[from] FilterError),

    /// Collection not found
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Request body is not a valid filter request
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::Filter(_) => StatusCode::BAD_REQUEST,

            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::CollectionNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable error code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            RestError::Filter(err) => err.code(),
            RestError::CollectionNotFound(_) => "COLLECTION_NOT_FOUND",
            RestError::InvalidBody(_) => "INVALID_BODY",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.code(),
            error: err.to_string(),
        }
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(status = status.as_u16(), error = %self, "request rejected");

        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
