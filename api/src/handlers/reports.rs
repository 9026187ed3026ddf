//! Expense report handlers
//!
//! Upload endpoint used by fundraiser owners.

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::app::{ReportSubmission, UploadReceipt};
use crate::error::AppError;
use crate::AppState;

/// Response body for a stored report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub fundraiser_id: String,
    pub bytes: usize,
    /// Hex SHA-256 of the stored bytes
    pub sha256: String,
    pub stored_at: String,
    /// Expected header columns the report lacks; the report is stored anyway
    pub missing_columns: Vec<String>,
}

impl From<UploadReceipt> for UploadResponse {
    fn from(receipt: UploadReceipt) -> Self {
        Self {
            success: true,
            message: "File uploaded successfully".to_string(),
            fundraiser_id: receipt.fundraiser_id.to_string(),
            bytes: receipt.bytes,
            sha256: receipt.sha256,
            stored_at: receipt.stored_at.to_rfc3339(),
            missing_columns: receipt
                .missing_columns
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// POST /api/upload-expense-report
///
/// Multipart fields: `csvFile` (the report), `fundraiserId`, `ngoAddress`.
/// Replaces any report previously stored for the fundraiser.
pub async fn upload_expense_report(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|_| AppError::MissingFile)?;
    let limit = state.report_service.max_report_bytes();
    let mut submission = ReportSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "csvFile" => submission.contents = Some(read_file(field, limit).await?),
            "fundraiserId" => {
                submission.fundraiser_id =
                    Some(field.text().await.map_err(|e| multipart_error(e, limit))?)
            }
            "ngoAddress" => {
                submission.submitter =
                    Some(field.text().await.map_err(|e| multipart_error(e, limit))?)
            }
            _ => {}
        }
    }

    let receipt = state.report_service.upload(submission).await?;
    Ok(Json(UploadResponse::from(receipt)))
}

/// Read the file field chunk by chunk, stopping as soon as it exceeds `limit`
async fn read_file(mut field: Field<'_>, limit: usize) -> Result<Vec<u8>, AppError> {
    let mut contents = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, limit))? {
        if contents.len() + chunk.len() > limit {
            return Err(AppError::FileTooLarge { limit });
        }
        contents.extend_from_slice(&chunk);
    }
    Ok(contents)
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit }
    } else {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    }
}
