use crate::error::Result;
use crate::models::DocumentFormat;
use bytes::Bytes;

/// Trait for text extractors that turn the raw bytes of one document format into text
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract all text in natural reading order.
    /// Parts of a structurally valid document that yield no text contribute an empty string.
    async fn extract(&self, bytes: Bytes) -> Result<String>;

    /// The format this extractor handles
    fn format(&self) -> DocumentFormat;
}
