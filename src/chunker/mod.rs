mod boundary;
mod matcher;
mod recursive;


pub use boundary::{BoundarySplitter, Chunk, split, split_document};
pub use matcher::{BoundaryMatch, BoundaryMatcher};
pub use recursive::RecursiveSplitter;

use crate::error::Result;

/// Target chunk size in bytes for prose splitting
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Bytes of trailing context carried into the next prose chunk
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Turns a document into ordered chunk strings
pub trait TextSplitter: Send + Sync {
    fn split_text(&self, text: &str) -> Result<Vec<String>>;
}
