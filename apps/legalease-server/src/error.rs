//! Error types for the development host

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Sample document not found: {0}")]
    SampleNotFound(String),

    #[error("Invalid sample name: {0}")]
    InvalidName(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: &'static str,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServerError::SampleNotFound(_) => (StatusCode::NOT_FOUND, "SAMPLE_NOT_FOUND"),
            ServerError::InvalidName(_) => (StatusCode::BAD_REQUEST, "INVALID_NAME"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code,
        };

        (status, Json(body)).into_response()
    }
}
