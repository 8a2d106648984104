use crate::models::DocumentFormat;
use thiserror::Error;

/// Errors surfaced by extraction and metadata generation.
///
/// Every failure aborts the request that produced it; nothing here is retried.
#[derive(Error, Debug)]
pub enum DocmetaError {
    #[error("unsupported file type '{extension}' for {file_name}")]
    UnsupportedFormat { file_name: String, extension: String },
    #[error("failed to decode {format} document: {message}")]
    Decoding {
        format: DocumentFormat,
        message: String,
    },
    #[error("model inference failed: {0}")]
    ModelInference(String),
    #[error("model failed to load: {0}")]
    ModelLoad(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DocmetaError {
    pub(crate) fn decoding(format: DocumentFormat, message: impl std::fmt::Display) -> Self {
        Self::Decoding {
            format,
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DocmetaError>;
