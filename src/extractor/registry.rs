use crate::config::OcrConfig;
use crate::error::Result;
use crate::extractor::{DocxExtractor, ImageExtractor, PdfExtractor, TextExtractor, TxtExtractor};
use crate::models::{Document, DocumentFormat};
use bytes::Bytes;
use std::sync::Arc;
use tracing::info;

/// Registry holding one extractor per supported format
pub struct ExtractorRegistry {
    pdf: Arc<dyn TextExtractor>,
    docx: Arc<dyn TextExtractor>,
    txt: Arc<dyn TextExtractor>,
    image: Arc<dyn TextExtractor>,
}

impl ExtractorRegistry {
    /// Create a registry with the default extractors and the given OCR extractor
    pub fn new(image: ImageExtractor) -> Self {
        Self {
            pdf: Arc::new(PdfExtractor::new()),
            docx: Arc::new(DocxExtractor::new()),
            txt: Arc::new(TxtExtractor::new()),
            image: Arc::new(image),
        }
    }

    /// Create a registry, probing the configured OCR engine
    pub async fn from_config(ocr: &OcrConfig) -> Self {
        Self::new(ImageExtractor::new(&ocr.executable, &ocr.language).await)
    }

    /// Get the extractor for a format
    pub fn get_handler(&self, format: DocumentFormat) -> Arc<dyn TextExtractor> {
        match format {
            DocumentFormat::Pdf => self.pdf.clone(),
            DocumentFormat::Docx => self.docx.clone(),
            DocumentFormat::Txt => self.txt.clone(),
            DocumentFormat::Image => self.image.clone(),
        }
    }

    /// Extract text from raw bytes of the given format
    pub async fn extract(&self, format: DocumentFormat, bytes: Bytes) -> Result<String> {
        let size = bytes.len();
        let text = self.get_handler(format).extract(bytes).await?;
        info!(%format, bytes = size, chars = text.chars().count(), "text extracted");
        Ok(text)
    }

    /// Extract text from an uploaded document
    pub async fn extract_document(&self, document: &Document) -> Result<String> {
        self.extract(document.format, document.bytes.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocmetaError;
    use crate::extractor::docx::tests::{build_docx, paragraph};

    async fn registry() -> ExtractorRegistry {
        ExtractorRegistry::new(ImageExtractor::new("docmeta-no-such-ocr-binary", "eng").await)
    }

    #[tokio::test]
    async fn test_registry_handles_every_format() {
        let registry = registry().await;
        for format in [
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
            DocumentFormat::Txt,
            DocumentFormat::Image,
        ] {
            assert_eq!(registry.get_handler(format).format(), format);
        }
    }

    #[tokio::test]
    async fn test_registry_extracts_txt_upload() {
        let registry = registry().await;
        let content = "The quick brown fox. The quick brown fox jumps.";
        let doc = Document::from_upload("fox.TXT", content.as_bytes().to_vec()).unwrap();

        let text = registry.extract_document(&doc).await.unwrap();
        assert_eq!(text, content);
    }

    #[tokio::test]
    async fn test_registry_extracts_docx_upload() {
        let registry = registry().await;
        let body = format!("{}{}", paragraph("Intro"), paragraph("Body text"));
        let doc = Document::from_upload("report.docx", build_docx(&body)).unwrap();

        let text = registry.extract_document(&doc).await.unwrap();
        assert_eq!(text, "Intro\nBody text");
    }

    #[tokio::test]
    async fn test_registry_empty_txt() {
        let registry = registry().await;
        let text = registry
            .extract(DocumentFormat::Txt, Bytes::new())
            .await
            .unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_registry_propagates_decoding_error() {
        let registry = registry().await;
        let err = registry
            .extract(DocumentFormat::Pdf, Bytes::from_static(b"%PDF-garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, DocmetaError::Decoding { .. }));
    }
}
