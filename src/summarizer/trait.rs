use crate::error::Result;

/// Trait for abstractive summarization backends
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize the full text. Inputs the model cannot process fail with
    /// `DocmetaError::ModelInference`; nothing is truncated beforehand.
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Load the model so later requests do not pay the cold start.
    /// Failure is `DocmetaError::ModelLoad`.
    async fn warm_up(&self) -> Result<()>;

    /// Name of the model behind this summarizer
    fn model(&self) -> &str;
}
