use crate::error::Result;
use crate::keywords::{KeywordExtractor, LexiconChunker};
use indexmap::IndexMap;
use tracing::debug;

/// Keyword extractor ranking noun phrases by how often they occur.
///
/// Phrases are compared exactly (case-sensitive, no stemming). Ties keep the order
/// in which the phrases first appear in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NounPhraseKeywords {
    chunker: LexiconChunker,
}

impl NounPhraseKeywords {
    pub fn new() -> Self {
        Self {
            chunker: LexiconChunker::new(),
        }
    }

    /// Count each distinct phrase, then rank by descending count
    pub fn rank(&self, text: &str, top_n: usize) -> Vec<String> {
        let mut freq: IndexMap<&str, usize> = IndexMap::new();
        for chunk in self.chunker.noun_chunks(text) {
            let phrase = chunk.trim();
            if phrase.is_empty() {
                continue;
            }
            *freq.entry(phrase).or_insert(0) += 1;
        }

        let distinct = freq.len();
        let mut ranked: Vec<(&str, usize)> = freq.into_iter().collect();
        // sort_by is stable, so equal counts stay in first-seen order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        debug!(distinct, top_n, "ranked noun phrases");
        ranked
            .into_iter()
            .take(top_n)
            .map(|(phrase, _)| phrase.to_string())
            .collect()
    }
}

impl KeywordExtractor for NounPhraseKeywords {
    fn extract_keywords(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(self.rank(text, top_n))
    }
}

/// Extract up to `top_n` keywords from `text` with the default noun-phrase extractor
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<String> {
    NounPhraseKeywords::new().rank(text, top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::DEFAULT_TOP_N;
    use std::collections::HashSet;

    #[test]
    fn test_repeated_phrase_is_top_keyword() {
        let text = "The quick brown fox. The quick brown fox jumps.";
        assert_eq!(
            extract_keywords(text, DEFAULT_TOP_N),
            vec!["The quick brown fox".to_string()]
        );
    }

    #[test]
    fn test_descending_frequency() {
        let text = "Mango. Apple. Apple. Zebra. Apple. Zebra.";
        assert_eq!(extract_keywords(text, 5), vec!["Apple", "Zebra", "Mango"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let text = "Zebra. Apple. Zebra. Apple. Mango.";
        assert_eq!(extract_keywords(text, 5), vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn test_case_sensitive_counting() {
        let text = "The fox. the fox. the fox.";
        assert_eq!(extract_keywords(text, 5), vec!["the fox", "The fox"]);
    }

    #[test]
    fn test_top_n_bounds_result() {
        let text = "Alpha. Beta. Gamma. Delta. Epsilon. Zeta. Eta.";
        assert_eq!(extract_keywords(text, 3).len(), 3);
        assert_eq!(extract_keywords(text, 0), Vec::<String>::new());
        assert_eq!(extract_keywords(text, 100).len(), 7);
    }

    #[test]
    fn test_keywords_are_distinct_substrings() {
        let text = "The committee met in the hall. The committee approved the budget. \
                    A new budget was drafted by the committee in the hall.";
        let keywords = extract_keywords(text, 10);

        let unique: HashSet<&String> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
        for keyword in &keywords {
            assert!(text.contains(keyword.as_str()), "{keyword} not in text");
            assert_eq!(keyword.trim(), keyword);
        }
    }

    #[test]
    fn test_order_stable_across_runs() {
        let text = "Solar panels convert sunlight. Wind turbines convert wind. \
                    Solar panels and wind turbines need maintenance.";
        let first = extract_keywords(text, 5);
        let second = extract_keywords(text, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_noun_phrases_yields_empty_list() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("... ?! --", 5).is_empty());
    }

    #[test]
    fn test_trait_object_extraction() {
        let extractor: Box<dyn KeywordExtractor> = Box::new(NounPhraseKeywords::new());
        let keywords = extractor
            .extract_keywords("The budget. The budget. A plan.", 1)
            .unwrap();
        assert_eq!(keywords, vec!["The budget"]);
    }
}
