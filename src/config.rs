use crate::error::{DocmetaError, Result};
use crate::keywords::DEFAULT_TOP_N;
use crate::summarizer::{DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from settings.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummarizerProvider {
    #[default]
    Huggingface,
    Ollama,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default)]
    pub provider: SummarizerProvider,
    /// Endpoint base URL; defaults depend on the provider
    #[serde(default)]
    pub url: Option<String>,
    /// Model name; defaults depend on the provider
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_min_length")]
    pub min_length: u32,
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

fn default_min_length() -> u32 {
    DEFAULT_MIN_LENGTH
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            provider: SummarizerProvider::default(),
            url: None,
            model: None,
            api_key: None,
            max_length: default_max_length(),
            min_length: default_min_length(),
        }
    }
}

impl SummarizerConfig {
    pub fn url(&self) -> &str {
        match (&self.url, self.provider) {
            (Some(url), _) => url.as_str(),
            (None, SummarizerProvider::Huggingface) => {
                "https://router.huggingface.co/hf-inference/models"
            }
            (None, SummarizerProvider::Ollama) => "http://127.0.0.1:11434",
        }
    }

    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model.as_str(),
            (None, SummarizerProvider::Huggingface) => "facebook/bart-large-cnn",
            (None, SummarizerProvider::Ollama) => "llama3.2",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(default = "default_ocr_executable")]
    pub executable: String,
    #[serde(default = "default_ocr_language")]
    pub language: String,
}

fn default_ocr_executable() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            executable: default_ocr_executable(),
            language: default_ocr_language(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    #[serde(default = "default_preview_chars")]
    pub chars: usize,
}

fn default_preview_chars() -> usize {
    1000
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            chars: default_preview_chars(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocmetaError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            DocmetaError::Config(format!("failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from the first default location that exists, or return defaults
    pub fn load() -> Result<Self> {
        let default_paths = [
            PathBuf::from("config/settings.toml"),
            PathBuf::from("./config/settings.toml"),
            PathBuf::from(shellexpand::tilde("~/.config/docmeta/settings.toml").as_ref()),
        ];

        for path in &default_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Self::default())
    }

    /// Summarizer API key from config or the HF_TOKEN environment variable
    pub fn summarizer_api_key(&self) -> Option<String> {
        self.summarizer
            .api_key
            .clone()
            .or_else(|| std::env::var("HF_TOKEN").ok())
            .filter(|key| !key.is_empty())
    }

    fn validate(&self) -> Result<()> {
        if self.summarizer.min_length > self.summarizer.max_length {
            return Err(DocmetaError::Config(format!(
                "summarizer.min_length ({}) exceeds summarizer.max_length ({})",
                self.summarizer.min_length, self.summarizer.max_length
            )));
        }
        Ok(())
    }
}
