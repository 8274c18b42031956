//! Document text extraction for uploaded CVs and job descriptions.
//!
//! Pure functions: bytes in, plain text out. PDF goes through `pdf-extract`,
//! DOCX through `docx-rs`; plain-text formats are decoded as UTF-8.

use std::path::Path;

use thiserror::Error;

pub mod handlers;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}': upload a PDF, DOCX or plain-text file")]
    UnsupportedType(String),

    #[error("Could not read document: {0}")]
    Unreadable(String),

    #[error("Document contains no extractable text")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md"];
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Decides how to read an upload from its declared content type, falling back
/// to the file extension.
pub fn detect_kind(
    file_name: &str,
    content_type: Option<&str>,
) -> Result<DocumentKind, ExtractionError> {
    let mime = content_type
        .map(|c| c.split(';').next().unwrap_or_default().trim().to_lowercase())
        .unwrap_or_default();

    if mime == "application/pdf" {
        return Ok(DocumentKind::Pdf);
    }
    if mime == DOCX_MIME {
        return Ok(DocumentKind::Docx);
    }
    if mime.starts_with("text/") {
        return Ok(DocumentKind::PlainText);
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => Ok(DocumentKind::Pdf),
        "docx" => Ok(DocumentKind::Docx),
        ext if TEXT_EXTENSIONS.contains(&ext) => Ok(DocumentKind::PlainText),
        _ => Err(ExtractionError::UnsupportedType(if mime.is_empty() {
            file_name.to_string()
        } else {
            mime
        })),
    }
}

pub fn extract_text(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, ExtractionError> {
    let text = match detect_kind(file_name, content_type)? {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Unreadable(e.to_string()))?,
        DocumentKind::Docx => docx_text(bytes)?,
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|_| ExtractionError::Unreadable("text is not valid UTF-8".to_string()))?,
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(text.to_string())
}

/// Concatenates the text runs of every top-level paragraph, one line each.
fn docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    use docx_rs::{DocumentChild, ParagraphChild, RunChild};

    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Unreadable(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}
