use crate::error::Result;

/// Trait for keyword extractors that rank candidate phrases found in text
pub trait KeywordExtractor: Send + Sync {
    /// Return at most `top_n` distinct keywords, most relevant first
    fn extract_keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>>;
}
