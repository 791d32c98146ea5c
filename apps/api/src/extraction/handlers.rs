//! Axum route handler for document upload and text extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{resolve_mime, DocumentKind};
use crate::state::AppState;

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub kind: DocumentKind,
}

/// POST /api/v1/documents/extract
///
/// Accepts a CV or job posting as PDF, Word or image and returns its text.
/// Unreadable documents still succeed; the text is then a placeholder.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let mime = resolve_mime(field.content_type(), file_name.as_deref());
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::Validation("uploaded file is empty".to_string()));
        }

        info!(
            "Extracting text from {} ({mime}, {} bytes)",
            file_name.as_deref().unwrap_or("upload"),
            bytes.len()
        );
        let kind = DocumentKind::from_mime(&mime);
        let text = state.extractor.extract(bytes.to_vec(), &mime).await;

        return Ok(Json(ExtractResponse { text, kind }));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}
