//! Axum route handler for document uploads.

use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::extract_text;

/// Uploads larger than this are rejected by the body-limit layer on the route.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub file_name: String,
    pub text: String,
}

/// POST /extract-text
///
/// Multipart upload with a single `file` field (PDF, DOCX or plain text).
pub async fn handle_extract_text(
    mut multipart: Multipart,
) -> Result<Json<ExtractTextResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Could not read upload: {e}")))?;

        debug!(file_name = %file_name, size = bytes.len(), "extracting text");

        // PDF parsing is CPU-bound and can panic on malformed input.
        let name = file_name.clone();
        let text = tokio::task::spawn_blocking(move || {
            extract_text(&name, content_type.as_deref(), &bytes)
        })
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::InvalidInput("Could not read document".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("text extraction task failed: {e}"))
            }
        })??;

        return Ok(Json(ExtractTextResponse { file_name, text }));
    }

    Err(AppError::InvalidInput(
        "Multipart body must contain a 'file' field".to_string(),
    ))
}
