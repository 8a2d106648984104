pub mod huggingface;
pub mod ollama;
pub mod r#trait;

pub use huggingface::HuggingFaceSummarizer;
pub use ollama::OllamaSummarizer;
pub use r#trait::Summarizer;

use crate::config::{SummarizerConfig, SummarizerProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound on summary length
pub const DEFAULT_MAX_LENGTH: u32 = 130;
/// Lower bound on summary length
pub const DEFAULT_MIN_LENGTH: u32 = 30;

/// Decoding configuration shared by all summarizer backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub max_length: u32,
    pub min_length: u32,
    /// Always false: summaries are decoded deterministically
    pub do_sample: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            do_sample: false,
        }
    }
}

impl From<&SummarizerConfig> for SummaryOptions {
    fn from(config: &SummarizerConfig) -> Self {
        Self {
            max_length: config.max_length,
            min_length: config.min_length,
            do_sample: false,
        }
    }
}

/// Build the configured summarizer backend
pub fn from_config(config: &SummarizerConfig, api_key: Option<String>) -> Arc<dyn Summarizer> {
    let options = SummaryOptions::from(config);
    match config.provider {
        SummarizerProvider::Huggingface => Arc::new(HuggingFaceSummarizer::new(
            config.url(),
            config.model(),
            api_key,
            options,
        )),
        SummarizerProvider::Ollama => {
            Arc::new(OllamaSummarizer::new(config.url(), config.model(), options))
        }
    }
}
