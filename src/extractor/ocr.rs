use crate::error::{DocmetaError, Result};
use crate::extractor::r#trait::TextExtractor;
use crate::models::DocumentFormat;
use bytes::Bytes;
use image::ImageFormat;
use std::io::Cursor;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// OCR extractor for raster images, running the tesseract engine as a child process
pub struct ImageExtractor {
    executable: String,
    language: String,
    engine_available: bool,
}

impl ImageExtractor {
    /// Create an extractor, probing whether the OCR executable can be run
    pub async fn new(executable: impl Into<String>, language: impl Into<String>) -> Self {
        let executable = executable.into();
        let engine_available = Self::check_command(&executable).await;
        if !engine_available {
            warn!(
                executable = %executable,
                "OCR engine not found; image uploads will fail. Install tesseract: brew install tesseract (macOS) or apt-get install tesseract-ocr (Linux)"
            );
        }

        Self {
            executable,
            language: language.into(),
            engine_available,
        }
    }

    /// Check if a command runs and reports its version
    async fn check_command(cmd: &str) -> bool {
        Command::new(cmd)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }

    pub fn engine_available(&self) -> bool {
        self.engine_available
    }

    /// Decode the raster image and re-encode it as PNG for the OCR engine
    fn normalize(bytes: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Image, e))?;

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Image, e))?;
        debug!(bytes = png.len(), "normalized image for OCR");
        Ok(png)
    }

    /// Run `tesseract stdin stdout -l <language>` over the PNG bytes
    async fn recognize(&self, png: Vec<u8>) -> Result<String> {
        let mut child = Command::new(&self.executable)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DocmetaError::ModelInference(format!("failed to run {}: {}", self.executable, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| DocmetaError::ModelInference("OCR stdin unavailable".to_string()))?;
        let writer = tokio::spawn(async move {
            let written = stdin.write_all(&png).await;
            drop(stdin);
            written
        });

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| DocmetaError::ModelInference(format!("OCR process failed: {e}")))?;
        let written = writer.await;

        // a failing engine may exit before reading its input; its stderr says why
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DocmetaError::ModelInference(format!(
                "{} exited with {}: {}",
                self.executable,
                output.status,
                stderr.trim()
            )));
        }

        written
            .map_err(|e| DocmetaError::ModelInference(format!("OCR input task failed: {e}")))?
            .map_err(|e| DocmetaError::ModelInference(format!("failed to send image to OCR: {e}")))?;

        // tesseract ends each page with a form feed
        Ok(String::from_utf8_lossy(&output.stdout).replace('\x0c', ""))
    }
}

#[async_trait::async_trait]
impl TextExtractor for ImageExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String> {
        let png = tokio::task::spawn_blocking(move || Self::normalize(&bytes))
            .await
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Image, e))??;

        if !self.engine_available {
            return Err(DocmetaError::ModelLoad(format!(
                "OCR engine '{}' is not available",
                self.executable
            )));
        }

        let text = self.recognize(png).await?;
        debug!(chars = text.len(), "recognized image text");
        Ok(text)
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Image
    }
}
