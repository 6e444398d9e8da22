// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use linkkeeper_common::ApiResponse;
use thiserror::Error;

use crate::remote::RemoteError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// The token gate left the request without an identity
    #[error("{0}")]
    Unauthenticated(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Remote command error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // handlers answer unauthenticated calls with 400, as existing clients expect
            AppError::Unauthenticated(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Remote(RemoteError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Remote(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthenticated(_) => "AUTH_001",
            AppError::NotFound(_) => "NF_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Remote(_) => "REMOTE_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            // already meant for the caller
            AppError::Unauthenticated(reason) => reason.clone(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Remote(_) => "Remote command failed".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        }

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = ApiResponse::<()>::error(
            status.as_u16(),
            Some(self.error_code().to_string()),
            message,
        );

        (status, Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
