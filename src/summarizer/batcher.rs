// batcher.rs - bounds how many chunk summaries run together

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Copy)]
pub struct Batcher {
    batch_size: usize,
}

impl Batcher {
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(PipelineError::config("batch_size must be > 0"));
        }
        Ok(Self { batch_size })
    }

    /// Consecutive slices of at most `batch_size`, in input order
    pub fn split<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        items.chunks(self.batch_size).collect()
    }
}
