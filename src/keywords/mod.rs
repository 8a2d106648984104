pub mod chunker;
pub mod noun_phrase;
pub mod r#trait;

pub use chunker::LexiconChunker;
pub use noun_phrase::{extract_keywords, NounPhraseKeywords};
pub use r#trait::KeywordExtractor;

/// Default number of keywords in a metadata record
pub const DEFAULT_TOP_N: usize = 5;
