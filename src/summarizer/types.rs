use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub summary: usize,
    pub content: usize,
}

/// One structural chunk with its generated title and summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkSummary {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub tokens: TokenCounts,
}

/// Per-file record.
///
/// `chunked_summaries` is keyed by generated title, so a later chunk with the
/// same title replaces an earlier one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub filename: String,
    pub global_summary: String,
    pub chunked_summaries: IndexMap<String, ChunkSummary>,
}
