use crate::error::{DocmetaError, Result};
use crate::extractor::r#trait::TextExtractor;
use crate::models::DocumentFormat;
use bytes::Bytes;

/// Plain text extractor: the bytes decoded as UTF-8, verbatim
pub struct TxtExtractor;

impl TxtExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TxtExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextExtractor for TxtExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Txt, e))
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Txt
    }
}
