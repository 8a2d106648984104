use crate::error::{DocmetaError, Result};
use crate::extractor::r#trait::TextExtractor;
use crate::models::DocumentFormat;
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

/// Main document part inside a DOCX package
const DOCUMENT_PART: &str = "word/document.xml";

/// DOCX extractor: body paragraphs in order, joined with newlines
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Docx, e))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Docx, format!("{DOCUMENT_PART}: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| DocmetaError::decoding(DocumentFormat::Docx, format!("{DOCUMENT_PART}: {e}")))?;
        Ok(xml)
    }

    /// Collect the text of each `w:p` that is a direct child of `w:body`.
    ///
    /// Paragraphs nested in tables or text boxes are not body paragraphs. Within a
    /// paragraph, `w:t` contributes its text, `w:tab` a tab and `w:br`/`w:cr` a newline;
    /// text inside nested text boxes is skipped.
    fn paragraphs(xml: &str) -> Result<Vec<String>> {
        let mut reader = Reader::from_str(xml);

        let mut paragraphs = Vec::new();
        let mut depth = 0usize;
        let mut body_depth: Option<usize> = None;
        let mut current: Option<String> = None;
        let mut paragraph_depth = 0usize;
        let mut in_text = false;
        let mut textbox_depth = 0usize;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| DocmetaError::decoding(DocumentFormat::Docx, e))?;

            match event {
                Event::Start(e) => {
                    depth += 1;
                    match e.local_name().as_ref() {
                        b"body" if body_depth.is_none() => body_depth = Some(depth),
                        b"p" if current.is_none() && body_depth.map(|d| d + 1) == Some(depth) => {
                            current = Some(String::new());
                            paragraph_depth = depth;
                        }
                        b"txbxContent" => textbox_depth += 1,
                        b"t" if current.is_some() && textbox_depth == 0 => in_text = true,
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    let body_child = body_depth.map(|d| d + 1) == Some(depth + 1);
                    match (e.local_name().as_ref(), current.as_mut()) {
                        (b"p", None) if body_child => paragraphs.push(String::new()),
                        (b"tab", Some(text)) if textbox_depth == 0 => text.push('\t'),
                        (b"br" | b"cr", Some(text)) if textbox_depth == 0 => text.push('\n'),
                        _ => {}
                    }
                }
                Event::Text(t) => {
                    if in_text {
                        if let Some(text) = current.as_mut() {
                            let unescaped = t
                                .unescape()
                                .map_err(|e| DocmetaError::decoding(DocumentFormat::Docx, e))?;
                            text.push_str(&unescaped);
                        }
                    }
                }
                Event::End(e) => {
                    match e.local_name().as_ref() {
                        b"t" => in_text = false,
                        b"txbxContent" => textbox_depth = textbox_depth.saturating_sub(1),
                        b"p" if depth == paragraph_depth => {
                            if let Some(text) = current.take() {
                                paragraphs.push(text);
                            }
                            paragraph_depth = 0;
                        }
                        b"body" if body_depth == Some(depth) => body_depth = None,
                        _ => {}
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TextExtractor for DocxExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String> {
        tokio::task::spawn_blocking(move || -> Result<String> {
            let xml = Self::read_document_part(&bytes)?;
            let paragraphs = Self::paragraphs(&xml)?;
            debug!(paragraphs = paragraphs.len(), "extracted DOCX paragraphs");
            Ok(paragraphs.join("\n"))
        })
        .await
        .map_err(|e| DocmetaError::decoding(DocumentFormat::Docx, e))?
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }
}
