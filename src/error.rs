// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Activity not found")]
    NotFound,

    #[error("Student already signed up")]
    AlreadyRegistered,

    #[error("Student not registered")]
    NotRegistered,

    /// Only raised when capacity enforcement is enabled.
    #[error("Activity is full")]
    ActivityFull,

    /// The store accepted the write but reported that nothing changed.
    #[error("Failed to update activity")]
    WriteFailure,

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound | AppError::NotRegistered => StatusCode::NOT_FOUND,
            AppError::AlreadyRegistered | AppError::ActivityFull => StatusCode::BAD_REQUEST,
            AppError::WriteFailure | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = match &self {
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (self.status_code(), Json(ErrorResponse { detail })).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
