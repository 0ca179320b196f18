use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

pub const DEFAULT_TOKEN_BUDGET: usize = 3000;
pub const DEFAULT_SUB_CHUNK_TOKENS: usize = 1500;
pub const DEFAULT_BATCH_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Largest document (in tokens) summarized in one piece
    pub token_budget: usize,
    /// Piece size used once a document is over budget
    pub sub_chunk_tokens: usize,
    /// Chunk summaries in flight at once
    pub batch_size: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            token_budget: DEFAULT_TOKEN_BUDGET,
            sub_chunk_tokens: DEFAULT_SUB_CHUNK_TOKENS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl SummarizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.token_budget == 0 {
            return Err(PipelineError::config("token_budget must be > 0"));
        }
        if self.sub_chunk_tokens == 0 {
            return Err(PipelineError::config("sub_chunk_tokens must be > 0"));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::config("batch_size must be > 0"));
        }
        if self.sub_chunk_tokens > self.token_budget {
            return Err(PipelineError::config(format!(
                "sub_chunk_tokens ({}) must not exceed token_budget ({})",
                self.sub_chunk_tokens, self.token_budget
            )));
        }
        Ok(())
    }
}
