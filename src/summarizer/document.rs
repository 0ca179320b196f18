use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use super::batcher::Batcher;
use super::chunk::ChunkSummarizer;
use super::config::SummarizerConfig;
use super::types::{ChunkSummary, DocumentSummary};
use crate::chunker::TextSplitter;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::tokenizer::TokenCounter;

/// Produces the global summary and the per-chunk summaries of one document
pub struct DocumentSummarizer {
    chunks: ChunkSummarizer,
    batcher: Batcher,
    config: SummarizerConfig,
}

impl DocumentSummarizer {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        tokenizer: Arc<dyn TokenCounter>,
        config: SummarizerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            chunks: ChunkSummarizer::new(llm, tokenizer),
            batcher: Batcher::new(config.batch_size)?,
            config,
        })
    }

    pub async fn summarize(
        &self,
        filename: &str,
        content: &str,
        splitter: &dyn TextSplitter,
    ) -> Result<DocumentSummary> {
        info!(file = filename, bytes = content.len(), "Summarizing document");

        let global_summary = self.global_summary(content).await?;

        let chunks = splitter.split_text(content)?;
        debug!(file = filename, chunks = chunks.len(), "Split into chunks");
        let chunked_summaries = self.summarize_chunks(&chunks).await?;

        Ok(DocumentSummary {
            filename: filename.to_string(),
            global_summary,
            chunked_summaries,
        })
    }

    /// Whole-document summary. Over budget, the text is first cut into
    /// `sub_chunk_tokens` pieces and those are summarized together.
    pub async fn global_summary(&self, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Ok(String::new());
        }

        let tokenizer = self.chunks.tokenizer();
        let total = tokenizer.count(content);

        let units = if total <= self.config.token_budget {
            vec![content.to_string()]
        } else {
            let parts = tokenizer.split_by_tokens(content, self.config.sub_chunk_tokens)?;
            info!(
                tokens = total,
                budget = self.config.token_budget,
                parts = parts.len(),
                "Document over token budget, summarizing in parts"
            );
            parts
        };

        Ok(self.chunks.llm().summarize(&units).await?)
    }

    /// Summarize chunks batch by batch. Every chunk of a batch is in flight at
    /// once; the next batch starts only after the whole batch has settled.
    pub async fn summarize_chunks(
        &self,
        chunks: &[String],
    ) -> Result<IndexMap<String, ChunkSummary>> {
        let mut summaries = IndexMap::with_capacity(chunks.len());
        let mut done = 0;

        for batch in self.batcher.split(chunks) {
            debug!(
                "Summarizing chunks {}..{} of {}",
                done + 1,
                done + batch.len(),
                chunks.len()
            );

            let results = join_all(batch.iter().map(|chunk| self.chunks.summarize(chunk))).await;

            for summary in results.into_iter().collect::<Result<Vec<_>>>()? {
                if let Some(replaced) = summaries.insert(summary.title.clone(), summary) {
                    warn!(title = %replaced.title, "Chunk title collision, keeping the later chunk");
                }
            }
            done += batch.len();
        }

        Ok(summaries)
    }
}
