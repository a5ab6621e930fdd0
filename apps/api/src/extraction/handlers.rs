use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text_owned, FileKind};

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub file_type: FileKind,
    pub text: String,
    pub char_count: usize,
}

struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

/// POST /api/v1/analysis/extract
///
/// Multipart body: a `file` part and an optional `file_type` part (`pdf`|`docx`).
/// Without `file_type` the type is inferred from the uploaded file name.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let mut upload: Option<Upload> = None;
    let mut declared_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(multipart_error)?;
                upload = Some(Upload { file_name, data });
            }
            Some("file_type") => {
                declared_type = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::Validation("missing 'file' part".to_string()))?;
    let kind = resolve_kind(declared_type.as_deref(), upload.file_name.as_deref())?;
    let size = upload.data.len();

    let text = extract_text_owned(upload.data, kind).await?;
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No readable text found in the uploaded file".to_string(),
        ));
    }

    let char_count = text.chars().count();
    info!("Extracted {char_count} chars from {size}-byte {kind:?} upload");

    Ok(Json(ExtractResponse {
        file_type: kind,
        text,
        char_count,
    }))
}

fn resolve_kind(declared: Option<&str>, file_name: Option<&str>) -> Result<FileKind, AppError> {
    match declared {
        Some(value) => FileKind::from_declared(value)
            .ok_or_else(|| AppError::Validation(format!("unsupported file_type '{value}'"))),
        None => file_name.and_then(FileKind::from_filename).ok_or_else(|| {
            AppError::Validation("file_type is required when the file name has no .pdf/.docx extension".to_string())
        }),
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("invalid multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_wins_over_file_name() {
        assert_eq!(
            resolve_kind(Some("docx"), Some("resume.pdf")).unwrap(),
            FileKind::Docx
        );
    }

    #[test]
    fn test_type_inferred_from_file_name() {
        assert_eq!(resolve_kind(None, Some("cv.pdf")).unwrap(), FileKind::Pdf);
    }

    #[test]
    fn test_unknown_types_rejected() {
        assert!(matches!(
            resolve_kind(Some("rtf"), None),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            resolve_kind(None, Some("cv.txt")),
            Err(AppError::Validation(_))
        ));
        assert!(resolve_kind(None, None).is_err());
    }
}
