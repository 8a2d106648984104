pub mod config;
pub mod error;
pub mod extractor;
pub mod keywords;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod summarizer;
pub mod utils;

pub use error::{DocmetaError, Result};
pub use extractor::{ExtractorRegistry, TextExtractor};
pub use keywords::{extract_keywords, KeywordExtractor};
pub use metadata::MetadataAssembler;
pub use models::{Document, DocumentFormat, MetadataRecord};
pub use pipeline::Pipeline;
pub use summarizer::Summarizer;
