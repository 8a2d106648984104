use crate::error::{DocmetaError, Result};
use crate::summarizer::{Summarizer, SummaryOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Text sent once at startup to make the inference service load the model
const WARM_UP_TEXT: &str = "The model is being loaded so that the first document summary \
    does not wait for a cold start. This sentence only exists to exercise the summarization \
    pipeline once before any uploaded document is processed.";

/// Summarizer calling a Hugging Face inference endpoint (e.g. facebook/bart-large-cnn)
pub struct HuggingFaceSummarizer {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    options: SummaryOptions,
}

impl HuggingFaceSummarizer {
    /// Create a new summarizer for `{base_url}/{model}`
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, options: SummaryOptions) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
            options,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct SummarizationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct InferenceError {
    error: String,
}

impl<'a> SummarizationRequest<'a> {
    fn new(inputs: &'a str, options: SummaryOptions) -> Self {
        Self {
            inputs,
            parameters: SummarizationParameters {
                max_length: options.max_length,
                min_length: options.min_length,
                do_sample: options.do_sample,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

/// Take the first summary out of a successful response body
fn parse_summary(body: &str) -> Result<String> {
    let outputs: Vec<SummaryOutput> = serde_json::from_str(body).map_err(|e| {
        DocmetaError::ModelInference(format!("failed to parse summarization response: {e}"))
    })?;

    outputs
        .into_iter()
        .next()
        .map(|output| output.summary_text)
        .ok_or_else(|| DocmetaError::ModelInference("summarization returned no output".to_string()))
}

/// The `error` field of a failed response, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<InferenceError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[async_trait::async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let request = SummarizationRequest::new(text, self.options);

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            DocmetaError::ModelInference(format!("failed to reach summarization endpoint: {e}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DocmetaError::ModelInference(format!("failed to read summarization response: {e}"))
        })?;

        if !status.is_success() {
            return Err(DocmetaError::ModelInference(format!(
                "{} returned {}: {}",
                self.model,
                status,
                error_message(&body)
            )));
        }

        let summary = parse_summary(&body)?;
        debug!(model = %self.model, input_chars = text.len(), summary_chars = summary.len(), "summary generated");
        Ok(summary)
    }

    async fn warm_up(&self) -> Result<()> {
        info!(model = %self.model, endpoint = %self.endpoint(), "loading summarization model");
        self.summarize(WARM_UP_TEXT)
            .await
            .map(|_| ())
            .map_err(|e| DocmetaError::ModelLoad(format!("{}: {}", self.model, e)))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
