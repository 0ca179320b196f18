use std::collections::VecDeque;

use super::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, TextSplitter};
use crate::error::{PipelineError, Result};

const TEXT_SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

const MARKDOWN_SEPARATORS: &[&str] = &[
    "\n## ",
    "\n### ",
    "\n#### ",
    "\n##### ",
    "\n###### ",
    "```\n\n",
    "\n\n***\n\n",
    "\n\n---\n\n",
    "\n\n___\n\n",
    "\n\n",
    "\n",
    " ",
    "",
];

/// Separator-driven splitter for prose (plain text, markdown)
///
/// Tries separators in order, merges small pieces up to `chunk_size` bytes and
/// recurses with the finer separators on pieces that are still too large.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    separators: Vec<String>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveSplitter {
    pub fn new(separators: Vec<String>, chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(PipelineError::config("chunk_size must be > 0"));
        }
        if chunk_overlap >= chunk_size {
            return Err(PipelineError::config(format!(
                "chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            separators,
            chunk_size,
            chunk_overlap,
        })
    }

    /// Paragraphs, then lines, then words, then characters
    pub fn text() -> Self {
        Self::with_defaults(TEXT_SEPARATORS)
    }

    /// Markdown headings and rules before the plain-text separators
    pub fn markdown() -> Self {
        Self::with_defaults(MARKDOWN_SEPARATORS)
    }

    fn with_defaults(separators: &[&str]) -> Self {
        Self {
            separators: separators.iter().map(|s| s.to_string()).collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }

    fn split_recursive(&self, text: &str, separators: &[String]) -> Vec<String> {
        // First separator present in the text; "" always matches
        let position = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s.as_str()))
            .unwrap_or(separators.len().saturating_sub(1));

        let separator = separators.get(position).map(String::as_str).unwrap_or("");
        let finer = separators.get(position + 1..).unwrap_or(&[]);

        let pieces = split_on(text, separator);

        let mut chunks = Vec::new();
        let mut pending: Vec<&str> = Vec::new();

        for piece in pieces {
            if piece.len() < self.chunk_size {
                pending.push(piece);
                continue;
            }

            // Flush what fits before descending into the oversized piece
            if !pending.is_empty() {
                chunks.extend(self.merge(&pending, separator));
                pending.clear();
            }

            if finer.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_recursive(piece, finer));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(&pending, separator));
        }

        chunks
    }

    /// Greedily join pieces up to `chunk_size`, keeping up to `chunk_overlap`
    /// bytes of trailing pieces as the start of the next chunk
    fn merge(&self, pieces: &[&str], separator: &str) -> Vec<String> {
        let sep_len = separator.len();
        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut current_len = 0;

        for &piece in pieces {
            let joined_len = |current: &VecDeque<&str>, total: usize| {
                total + piece.len() + if current.is_empty() { 0 } else { sep_len }
            };

            if joined_len(&current, current_len) > self.chunk_size && !current.is_empty() {
                push_joined(&mut chunks, &current, separator);

                while current_len > self.chunk_overlap
                    || (joined_len(&current, current_len) > self.chunk_size && current_len > 0)
                {
                    let Some(dropped) = current.pop_front() else {
                        break;
                    };
                    current_len -= dropped.len() + if current.is_empty() { 0 } else { sep_len };
                }
            }

            current_len = joined_len(&current, current_len);
            current.push_back(piece);
        }

        if !current.is_empty() {
            push_joined(&mut chunks, &current, separator);
        }

        chunks
    }
}

impl TextSplitter for RecursiveSplitter {
    fn split_text(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.split_recursive(text, &self.separators))
    }
}

fn split_on<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    if separator.is_empty() {
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    } else {
        text.split(separator).filter(|p| !p.is_empty()).collect()
    }
}

fn push_joined(chunks: &mut Vec<String>, pieces: &VecDeque<&str>, separator: &str) {
    let joined = pieces.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
