//! Unified error types for the DonorLens API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business rule violations
//! - `LedgerError`: Fundraiser ledger gateway errors
//! - `ReportError`: Expense report storage and parsing errors
//! - `AppError`: Application layer errors (mapped to HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// Ledger gateway errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Expense report errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report unreadable: {0}")]
    Unreadable(#[from] csv::Error),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Fundraiser source unavailable: {0}")]
    SourceUnavailable(#[from] LedgerError),

    #[error("{0}")]
    Report(#[from] ReportError),

    #[error("No file uploaded")]
    MissingFile,

    #[error("File exceeds the {limit} byte limit")]
    FileTooLarge { limit: usize },

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "Forbidden", Some(msg.clone()))
            }
            AppError::SourceUnavailable(e) => {
                tracing::error!(error = %e, "Fundraiser source unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "Fundraiser source unavailable",
                    None,
                )
            }
            AppError::Report(e) => {
                tracing::error!(error = %e, "Report storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store expense report",
                    None,
                )
            }
            AppError::MissingFile => (StatusCode::BAD_REQUEST, "No file uploaded", None),
            AppError::FileTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File too large",
                Some(format!("Expense reports are limited to {} bytes", limit)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
