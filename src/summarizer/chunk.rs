use std::sync::Arc;

use super::types::{ChunkSummary, TokenCounts};
use crate::error::Result;
use crate::llm::{LanguageModel, prompts};
use crate::tokenizer::TokenCounter;

/// Titles and summarizes a single chunk
#[derive(Clone)]
pub struct ChunkSummarizer {
    llm: Arc<dyn LanguageModel>,
    tokenizer: Arc<dyn TokenCounter>,
}

impl ChunkSummarizer {
    pub fn new(llm: Arc<dyn LanguageModel>, tokenizer: Arc<dyn TokenCounter>) -> Self {
        Self { llm, tokenizer }
    }

    pub(crate) fn llm(&self) -> &dyn LanguageModel {
        self.llm.as_ref()
    }

    pub(crate) fn tokenizer(&self) -> &dyn TokenCounter {
        self.tokenizer.as_ref()
    }

    /// Two model calls (title, then detailed summary) and two token counts.
    /// The title is taken verbatim; failures are returned unchanged.
    pub async fn summarize(&self, chunk: &str) -> Result<ChunkSummary> {
        let title = self.llm.generate(&prompts::three_word_title(chunk)).await?;
        let summary = self.llm.generate(&prompts::detailed_summary(chunk)).await?;

        let tokens = TokenCounts {
            summary: self.tokenizer.count(&summary),
            content: self.tokenizer.count(chunk),
        };

        Ok(ChunkSummary {
            title,
            summary,
            content: chunk.to_string(),
            tokens,
        })
    }
}
