//! Text extraction — best-effort plain text from uploaded PDF and DOCX files.
//!
//! Extraction never fails on bad input: malformed PDFs fall back to scraping
//! literal strings, unreadable DOCX files produce an empty string.
//! Parsing is CPU-bound and runs inside `tokio::task::spawn_blocking`.

pub mod docx;
pub mod handlers;
pub mod pdf;

use std::sync::LazyLock;

use bytes::Bytes;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::text::normalize;

static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("static blank line regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    /// Parses a declared type such as `pdf` or `DOCX`.
    pub fn from_declared(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            _ => None,
        }
    }

    /// Infers the type from a file name extension.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_declared(ext)
    }
}

pub fn extract_text(bytes: &[u8], kind: FileKind) -> String {
    match kind {
        FileKind::Pdf => pdf::extract_pdf_text(bytes),
        FileKind::Docx => docx::extract_docx_text(bytes),
    }
}

/// Runs `extract_text` on the blocking pool.
pub async fn extract_text_owned(bytes: Bytes, kind: FileKind) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))
}

/// CRLF → LF, tabs and NBSP → spaces, collapses space runs and 3+ newlines, trims.
pub fn normalize_extracted(text: &str) -> String {
    let flattened = normalize(&text.replace('\t', " "));
    BLANK_LINES_RE
        .replace_all(&flattened, "\n\n")
        .trim()
        .to_string()
}
