use crate::config::Config;
use crate::error::Result;
use crate::extractor::ExtractorRegistry;
use crate::keywords::{self, NounPhraseKeywords};
use crate::metadata::MetadataAssembler;
use crate::models::{Document, MetadataRecord};
use crate::summarizer;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, info};

/// Extraction and metadata generation with every model loaded.
///
/// Built once at startup by [`Pipeline::load`] and shared immutably afterwards.
pub struct Pipeline {
    extractors: ExtractorRegistry,
    assembler: MetadataAssembler,
}

impl Pipeline {
    pub fn new(extractors: ExtractorRegistry, assembler: MetadataAssembler) -> Self {
        Self {
            extractors,
            assembler,
        }
    }

    /// Load all models. Must succeed before any document is processed.
    ///
    /// Order: keyword lexicon, OCR engine probe, summarizer warm-up. A missing OCR
    /// engine is only logged; a summarizer that cannot be loaded fails with
    /// `ModelLoad`.
    pub async fn load(config: &Config) -> Result<Self> {
        keywords::chunker::init();
        debug!("keyword lexicon ready");

        let extractors = ExtractorRegistry::from_config(&config.ocr).await;

        let summarizer = summarizer::from_config(&config.summarizer, config.summarizer_api_key());
        summarizer.warm_up().await?;
        info!(model = summarizer.model(), "summarization model loaded");

        let assembler = MetadataAssembler::new(
            Arc::new(NounPhraseKeywords::new()),
            summarizer,
            config.keywords.top_n,
        );

        Ok(Self::new(extractors, assembler))
    }

    /// Extract the text of an uploaded file.
    /// Unsupported extensions are rejected before any extractor runs.
    pub async fn extract_upload(&self, file_name: &str, bytes: impl Into<Bytes>) -> Result<String> {
        let document = Document::from_upload(file_name, bytes)?;
        self.extractors.extract_document(&document).await
    }

    /// Generate the metadata record for already extracted text
    pub async fn generate_metadata(
        &self,
        text: &str,
        file_name: &str,
        author: Option<&str>,
    ) -> Result<MetadataRecord> {
        self.assembler.assemble(text, file_name, author).await
    }
}
