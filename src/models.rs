use crate::error::{DocmetaError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal used for the author when none is declared, and for the document type.
pub const UNKNOWN: &str = "Unknown";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
    Image,
}

impl DocumentFormat {
    /// Map a file extension (without the dot, any case) to a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            "jpg" | "jpeg" | "png" => Some(Self::Image),
            _ => None,
        }
    }

    /// Infer the format from the text after the last dot of a file name
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = crate::utils::get_extension(file_name);
        Self::from_extension(&extension).ok_or_else(|| DocmetaError::UnsupportedFormat {
            file_name: file_name.to_string(),
            extension,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An uploaded document. Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl Document {
    /// Create a document, inferring its format from the file name.
    /// Unsupported extensions are rejected here, before any extractor runs.
    pub fn from_upload(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self> {
        let file_name = file_name.into();
        let format = DocumentFormat::from_file_name(&file_name)?;
        Ok(Self {
            file_name,
            format,
            bytes: bytes.into(),
        })
    }
}

/// Metadata generated for a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataRecord {
    /// The uploaded file name
    pub title: String,
    /// Declared author, or "Unknown"
    pub author: String,
    /// Generation date, `YYYY-MM-DD`
    pub date_created: String,
    /// Most frequent noun phrases, most frequent first
    pub keywords: Vec<String>,
    pub summary: String,
    /// No classification is performed; always "Unknown"
    pub document_type: String,
}
