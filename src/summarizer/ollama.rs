use crate::error::{DocmetaError, Result};
use crate::summarizer::{Summarizer, SummaryOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Summarizer using a local Ollama server
pub struct OllamaSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    options: SummaryOptions,
}

impl OllamaSummarizer {
    /// Create a new summarizer
    /// Default URL: http://127.0.0.1:11434
    pub fn new(base_url: &str, model: &str, options: SummaryOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            options,
        }
    }

    fn prompt(&self, text: &str) -> String {
        format!(
            "Summarize the following text in {} to {} words. Reply with the summary only.\n\n{}",
            self.options.min_length, self.options.max_length, text
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

/// Greedy decoding: zero temperature and a fixed seed
#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    seed: u64,
    num_predict: u32,
}

#[derive(Serialize)]
struct LoadRequest<'a> {
    model: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait::async_trait]
impl Summarizer for OllamaSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);

        let request = GenerateRequest {
            model: &self.model,
            prompt: self.prompt(text),
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                seed: 0,
                num_predict: self.options.max_length,
            },
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DocmetaError::ModelInference(format!("failed to connect to Ollama: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DocmetaError::ModelInference(format!(
                "Ollama API returned error {}: {}",
                status,
                error_text.trim()
            )));
        }

        let generated: GenerateResponse = response.json().await.map_err(|e| {
            DocmetaError::ModelInference(format!("failed to parse Ollama response: {e}"))
        })?;

        let summary = generated.response.trim().to_string();
        debug!(model = %self.model, summary_chars = summary.len(), "summary generated");
        Ok(summary)
    }

    async fn warm_up(&self) -> Result<()> {
        info!(model = %self.model, url = %self.base_url, "loading summarization model");
        // a generate request without a prompt only loads the model
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoadRequest { model: &self.model })
            .send()
            .await
            .map_err(|e| DocmetaError::ModelLoad(format!("failed to connect to Ollama: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DocmetaError::ModelLoad(format!(
                "{}: Ollama returned {}: {}",
                self.model,
                status,
                error_text.trim()
            )));
        }
        Ok(())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
