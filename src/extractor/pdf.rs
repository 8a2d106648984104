use crate::error::{DocmetaError, Result};
use crate::extractor::r#trait::TextExtractor;
use crate::models::DocumentFormat;
use bytes::Bytes;
use lopdf::Document;
use tracing::{debug, warn};

/// PDF text extractor backed by lopdf
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Concatenate the text of every page in page order, with no separator.
    fn extract_pages(bytes: &[u8]) -> Result<String> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Pdf, e))?;

        let pages = doc.get_pages();
        let mut text_content = String::new();

        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                // lopdf terminates every text block with a newline
                Ok(page_text) => text_content.push_str(page_text.trim_end_matches('\n')),
                Err(e) => {
                    warn!(page = *page_num, error = %e, "PDF page yielded no text");
                }
            }
        }

        debug!(pages = pages.len(), chars = text_content.len(), "extracted PDF text");
        Ok(text_content)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::extract_pages(&bytes))
            .await
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Pdf, e))?
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }
}
