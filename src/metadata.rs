use crate::error::{DocmetaError, Result};
use crate::keywords::KeywordExtractor;
use crate::models::{MetadataRecord, UNKNOWN};
use crate::summarizer::Summarizer;
use std::sync::Arc;
use tracing::info;

/// Format of `MetadataRecord::date_created`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds metadata records from extracted text
pub struct MetadataAssembler {
    keywords: Arc<dyn KeywordExtractor>,
    summarizer: Arc<dyn Summarizer>,
    top_n: usize,
}

impl MetadataAssembler {
    pub fn new(
        keywords: Arc<dyn KeywordExtractor>,
        summarizer: Arc<dyn Summarizer>,
        top_n: usize,
    ) -> Self {
        Self {
            keywords,
            summarizer,
            top_n,
        }
    }

    /// Generate the metadata record for `text`.
    ///
    /// Keyword extraction and summarization run concurrently on the same text. If either
    /// fails the whole call fails and no record is produced.
    pub async fn assemble(
        &self,
        text: &str,
        file_name: &str,
        author: Option<&str>,
    ) -> Result<MetadataRecord> {
        let keyword_task = {
            let extractor = self.keywords.clone();
            let owned = text.to_string();
            let top_n = self.top_n;
            async move {
                tokio::task::spawn_blocking(move || extractor.extract_keywords(&owned, top_n))
                    .await
                    .map_err(|e| {
                        DocmetaError::ModelInference(format!("keyword extraction task failed: {e}"))
                    })?
            }
        };

        let (keywords, summary) =
            tokio::try_join!(keyword_task, self.summarizer.summarize(text))?;

        let author = author
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(UNKNOWN);

        info!(
            file_name,
            keywords = keywords.len(),
            summary_chars = summary.len(),
            model = self.summarizer.model(),
            "metadata generated"
        );

        Ok(MetadataRecord {
            title: file_name.to_string(),
            author: author.to_string(),
            date_created: chrono::Local::now().format(DATE_FORMAT).to_string(),
            keywords,
            summary,
            document_type: UNKNOWN.to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::keywords::NounPhraseKeywords;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Summarizer returning a fixed summary and recording what it was given
    pub(crate) struct FixedSummarizer {
        pub(crate) summary: String,
        pub(crate) seen: Mutex<Vec<String>>,
    }

    impl FixedSummarizer {
        pub(crate) fn new(summary: &str) -> Self {
            Self {
                summary: summary.to_string(),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, text: &str) -> Result<String> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(self.summary.clone())
        }

        async fn warm_up(&self) -> Result<()> {
            Ok(())
        }

        fn model(&self) -> &str {
            "fixed"
        }
    }

    /// Summarizer that always fails, as if the input exceeded the model's capacity
    pub(crate) struct FailingSummarizer;

    #[async_trait::async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String> {
            Err(DocmetaError::ModelInference(
                "input exceeds maximum sequence length".to_string(),
            ))
        }

        async fn warm_up(&self) -> Result<()> {
            Err(DocmetaError::ModelLoad("weights not found".to_string()))
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    struct FailingKeywords;

    impl KeywordExtractor for FailingKeywords {
        fn extract_keywords(&self, _text: &str, _top_n: usize) -> Result<Vec<String>> {
            Err(DocmetaError::ModelInference("parser crashed".to_string()))
        }
    }

    fn assembler(summarizer: Arc<dyn Summarizer>) -> MetadataAssembler {
        MetadataAssembler::new(Arc::new(NounPhraseKeywords::new()), summarizer, 5)
    }

    #[tokio::test]
    async fn test_assemble_without_author() {
        let assembler = assembler(Arc::new(FixedSummarizer::new("A fox, twice.")));
        let text = "The quick brown fox. The quick brown fox jumps.";

        let record = assembler.assemble(text, "fox.txt", None).await.unwrap();

        assert_eq!(record.title, "fox.txt");
        assert_eq!(record.author, "Unknown");
        assert_eq!(record.document_type, "Unknown");
        assert_eq!(record.keywords, vec!["The quick brown fox"]);
        assert_eq!(record.summary, "A fox, twice.");
    }

    #[tokio::test]
    async fn test_assemble_with_author() {
        let assembler = assembler(Arc::new(FixedSummarizer::new("s")));
        let record = assembler
            .assemble("Some text.", "a.pdf", Some("Ada Lovelace"))
            .await
            .unwrap();
        assert_eq!(record.author, "Ada Lovelace");
        assert_eq!(record.document_type, "Unknown");
    }

    #[tokio::test]
    async fn test_blank_author_is_unknown() {
        let assembler = assembler(Arc::new(FixedSummarizer::new("s")));
        let record = assembler
            .assemble("Some text.", "a.pdf", Some("  "))
            .await
            .unwrap();
        assert_eq!(record.author, "Unknown");
    }

    #[tokio::test]
    async fn test_date_created_is_today() {
        let assembler = assembler(Arc::new(FixedSummarizer::new("s")));
        let record = assembler.assemble("Text.", "a.txt", None).await.unwrap();

        let date = NaiveDate::parse_from_str(&record.date_created, DATE_FORMAT).unwrap();
        assert_eq!(date, chrono::Local::now().date_naive());
    }

    #[tokio::test]
    async fn test_summarizer_receives_full_text() {
        let summarizer = Arc::new(FixedSummarizer::new("s"));
        let assembler = assembler(summarizer.clone());
        let text = "word ".repeat(5000);

        assembler.assemble(&text, "long.txt", None).await.unwrap();

        let seen = summarizer.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[text]);
    }

    #[tokio::test]
    async fn test_summarizer_failure_produces_no_record() {
        let assembler = assembler(Arc::new(FailingSummarizer));
        let result = assembler
            .assemble("The quick brown fox.", "fox.txt", None)
            .await;
        assert!(matches!(result, Err(DocmetaError::ModelInference(_))));
    }

    #[tokio::test]
    async fn test_keyword_failure_produces_no_record() {
        let assembler = MetadataAssembler::new(
            Arc::new(FailingKeywords),
            Arc::new(FixedSummarizer::new("s")),
            5,
        );
        let result = assembler.assemble("Text.", "a.txt", None).await;
        assert!(matches!(result, Err(DocmetaError::ModelInference(_))));
    }

    #[tokio::test]
    async fn test_record_serializes_for_display() {
        let assembler = assembler(Arc::new(FixedSummarizer::new("s")));
        let record = assembler.assemble("Budget. Budget.", "b.docx", None).await.unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string_pretty(&record).unwrap()).unwrap();
        assert_eq!(json["title"], "b.docx");
        assert_eq!(json["keywords"], serde_json::json!(["Budget"]));
        assert_eq!(json["document_type"], "Unknown");
    }
}
