// Public API exports
pub mod chunker;
pub mod config;
pub mod corpus;
pub mod error;
pub mod llm;
pub mod summarizer;
pub mod tokenizer;

// Re-export main types for convenience
pub use error::{PipelineError, Result};

pub use chunker::{
    BoundaryMatch, BoundaryMatcher, BoundarySplitter, Chunk, RecursiveSplitter, TextSplitter,
    split, split_document,
};

pub use tokenizer::{HeuristicCounter, TiktokenCounter, TokenCounter};

pub use llm::{LanguageModel, OpenAiClient, ServiceError, map_reduce};

pub use summarizer::{
    ChunkSummarizer, ChunkSummary, DocumentSummarizer, DocumentSummary, SummarizerConfig,
    TokenCounts, summarize_document,
};

pub use config::{LlmSettings, Settings};

pub use corpus::{CorpusOptions, CorpusSummary, InputFormat, OutputFormat, summarize_corpus};
