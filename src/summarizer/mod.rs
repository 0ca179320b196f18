pub mod batcher;
pub mod chunk;
pub mod config;
pub mod document;
pub mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use batcher::Batcher;
pub use chunk::ChunkSummarizer;
pub use config::{
    DEFAULT_BATCH_SIZE, DEFAULT_SUB_CHUNK_TOKENS, DEFAULT_TOKEN_BUDGET, SummarizerConfig,
};
pub use document::DocumentSummarizer;
pub use types::{ChunkSummary, DocumentSummary, TokenCounts};

use crate::chunker::{BoundaryMatcher, BoundarySplitter};
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::tokenizer::TokenCounter;

/// Summarize one source document split on `matcher` boundaries
pub async fn summarize_document(
    filename: &str,
    content: &str,
    matcher: &BoundaryMatcher,
    llm: Arc<dyn LanguageModel>,
    tokenizer: Arc<dyn TokenCounter>,
    config: SummarizerConfig,
) -> Result<DocumentSummary> {
    let splitter = BoundarySplitter::new(matcher.clone());
    DocumentSummarizer::new(llm, tokenizer, config)?
        .summarize(filename, content, &splitter)
        .await
}
