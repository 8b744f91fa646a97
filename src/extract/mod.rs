//! Text source adapters: uploaded bytes → plain text for the classifier.
//!
//! The upload boundary (size limit, extension whitelist) is enforced here so
//! that nothing unsupported ever reaches the decision engine.

pub mod eml;
pub mod html;
pub mod pdf;

use std::path::Path;

use tracing::debug;

use crate::error::{ExtractError, UploadError};

pub use eml::extract_text_from_eml;
pub use html::strip_html;
pub use pdf::extract_text_from_pdf;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Txt,
    Pdf,
    Eml,
}

impl UploadKind {
    /// Infer the format from a filename. Missing name or extension means `.txt`.
    pub fn from_filename(filename: Option<&str>) -> Result<Self, UploadError> {
        let extension = filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "" | "txt" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            "eml" => Ok(Self::Eml),
            _ => Err(UploadError::UnsupportedType { extension }),
        }
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Eml => "eml",
        }
    }
}

/// Check an uploaded file against the boundary rules and return its kind.
pub fn validate_upload(
    filename: Option<&str>,
    data: &[u8],
    max_bytes: usize,
) -> Result<UploadKind, UploadError> {
    if data.is_empty() {
        return Err(UploadError::Empty);
    }
    if data.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size: data.len(),
            max: max_bytes,
        });
    }
    UploadKind::from_filename(filename)
}

/// Best-effort plain text for `data` of the given kind.
pub fn extract_text(kind: UploadKind, data: &[u8]) -> Result<String, ExtractError> {
    let text = match kind {
        UploadKind::Txt => String::from_utf8_lossy(data).into_owned(),
        UploadKind::Pdf => extract_text_from_pdf(data)?,
        UploadKind::Eml => extract_text_from_eml(data),
    };
    debug!(kind = kind.label(), chars = text.len(), "Text extracted");
    Ok(text)
}
