use thiserror::Error;

use crate::llm::ServiceError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors surfaced by splitting and summarization
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Rejected at construction: empty keyword set, zero budgets, bad settings
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// An LLM or tokenizer call failed
    #[error("External service failed: {0}")]
    ExternalService(#[from] ServiceError),

    /// The splitter's own bookkeeping is inconsistent. Never caused by input.
    #[error("Splitter invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
