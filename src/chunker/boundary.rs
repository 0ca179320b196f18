use super::{BoundaryMatcher, TextSplitter};
use crate::error::{PipelineError, Result};

/// A chunk cut at structural boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Trimmed chunk text
    pub text: String,
    /// Byte offset of the untrimmed span in the document (start)
    pub start_offset: usize,
    /// Byte offset of the untrimmed span in the document (end)
    pub end_offset: usize,
}

/// Split a document into chunks aligned to the matcher's boundary lines.
///
/// Untrimmed spans are contiguous and cover the whole document, in source
/// order. Text before the first boundary becomes its own chunk unless it is
/// blank; a boundary at offset 0 starts the first chunk. Each later chunk
/// runs from one boundary up to the next, and the last one to the end.
pub fn split_document(document: &str, matcher: &BoundaryMatcher) -> Result<Vec<Chunk>> {
    let mut chunks = Vec::new();

    let Some(first) = matcher.match_boundary(document) else {
        push_span(&mut chunks, document, 0, document.len());
        return Ok(chunks);
    };

    // Leading text is separate; an immediate match is not
    if first.start > 0 {
        push_span(&mut chunks, document, 0, first.start);
    }

    let mut cursor = first.start;
    loop {
        let boundary = matcher.match_boundary_at(document, cursor).ok_or_else(|| {
            PipelineError::invariant(format!("no boundary at cursor {cursor}"))
        })?;
        if boundary.start != cursor {
            return Err(PipelineError::invariant(format!(
                "boundary expected at {cursor}, found at {}",
                boundary.start
            )));
        }

        match matcher.match_boundary_at(document, boundary.end()) {
            Some(next) => {
                push_span(&mut chunks, document, cursor, next.start);
                cursor = next.start;
            }
            None => {
                push_span(&mut chunks, document, cursor, document.len());
                break;
            }
        }
    }

    Ok(chunks)
}

/// Split a document into trimmed chunk strings
pub fn split(document: &str, matcher: &BoundaryMatcher) -> Result<Vec<String>> {
    Ok(split_document(document, matcher)?
        .into_iter()
        .map(|c| c.text)
        .collect())
}

fn push_span(chunks: &mut Vec<Chunk>, document: &str, start: usize, end: usize) {
    let text = document[start..end].trim();
    if text.is_empty() {
        return;
    }

    chunks.push(Chunk {
        text: text.to_string(),
        start_offset: start,
        end_offset: end,
    });
}

/// [`TextSplitter`] over a [`BoundaryMatcher`]
#[derive(Debug, Clone)]
pub struct BoundarySplitter {
    matcher: BoundaryMatcher,
}

impl BoundarySplitter {
    pub fn new(matcher: BoundaryMatcher) -> Self {
        Self { matcher }
    }

    /// Solidity-style declarations
    pub fn solidity() -> Result<Self> {
        BoundaryMatcher::compile(["contract", "interface", "function", "constructor"]).map(Self::new)
    }

    /// JS/TS classes, interfaces, functions and constructors
    pub fn javascript() -> Result<Self> {
        BoundaryMatcher::compile(["function", "constructor", "class", "interface"]).map(Self::new)
    }
}

impl TextSplitter for BoundarySplitter {
    fn split_text(&self, text: &str) -> Result<Vec<String>> {
        split(text, &self.matcher)
    }
}
