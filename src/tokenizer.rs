use tiktoken_rs::{CoreBPE, cl100k_base, get_bpe_from_model, o200k_base};

use crate::error::{PipelineError, Result};
use crate::llm::ServiceError;

/// Counts tokens for a fixed tokenizer identity
pub trait TokenCounter: Send + Sync {
    /// Deterministic token count of `text`
    fn count(&self, text: &str) -> usize;

    /// Cut `text` into consecutive pieces of at most `max_tokens` tokens.
    ///
    /// The default packs whole lines greedily and cuts a line that is over the
    /// limit on char boundaries. Counts are assumed to grow with the text; a
    /// single char that alone exceeds the limit becomes its own piece.
    /// Concatenating the pieces gives back `text`.
    fn split_by_tokens(&self, text: &str, max_tokens: usize) -> Result<Vec<String>> {
        if max_tokens == 0 {
            return Err(PipelineError::config("max_tokens must be > 0"));
        }

        let mut pieces = Vec::new();
        let mut current = String::new();

        for line in text.split_inclusive('\n') {
            let mut rest = line;

            while !rest.is_empty() {
                let kept = current.len();
                current.push_str(rest);
                if self.count(&current) <= max_tokens {
                    break;
                }
                current.truncate(kept);

                if !current.is_empty() {
                    pieces.push(std::mem::take(&mut current));
                    continue;
                }

                let cut = fitting_prefix(self, rest, max_tokens);
                pieces.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
        }

        if !current.is_empty() {
            pieces.push(current);
        }

        Ok(pieces)
    }
}

/// Byte length of the longest char-aligned prefix of `text` within
/// `max_tokens`, never less than one char
fn fitting_prefix<C: TokenCounter + ?Sized>(counter: &C, text: &str, max_tokens: usize) -> usize {
    let ends: Vec<usize> = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .collect();

    let fits = ends.partition_point(|&end| counter.count(&text[..end]) <= max_tokens);
    ends[fits.saturating_sub(1)]
}

/// BPE token counter backed by tiktoken-rs
pub struct TiktokenCounter {
    bpe: CoreBPE,
}

impl TiktokenCounter {
    /// Build from a model name ("gpt-4") or an encoding name ("cl100k_base")
    pub fn new(model_or_encoding: &str) -> Result<Self> {
        let lower = model_or_encoding.to_ascii_lowercase();

        let bpe = match get_bpe_from_model(&lower) {
            Ok(bpe) => bpe,
            Err(_) => match lower.as_str() {
                "cl100k_base" => cl100k_base(),
                "o200k_base" => o200k_base(),
                _ => {
                    return Err(PipelineError::config(format!(
                        "unsupported model or encoding: {model_or_encoding}"
                    )));
                }
            }
            .map_err(|e| PipelineError::config(format!("load {lower}: {e}")))?,
        };

        Ok(Self { bpe })
    }

    /// The encoding used by GPT-3.5/GPT-4
    pub fn cl100k() -> Result<Self> {
        Self::new("cl100k_base")
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn split_by_tokens(&self, text: &str, max_tokens: usize) -> Result<Vec<String>> {
        if max_tokens == 0 {
            return Err(PipelineError::config("max_tokens must be > 0"));
        }

        let tokens = self.bpe.encode_ordinary(text);
        let mut pieces = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let (end, piece) = self.decode_window(&tokens, start, max_tokens)?;
            pieces.push(piece);
            start = end;
        }

        Ok(pieces)
    }
}

impl TiktokenCounter {
    /// Decode the widest window from `start` of at most `max_tokens` tokens.
    ///
    /// A window ending inside a multi-byte character is pulled back; it only
    /// grows past `max_tokens` when one character needs more tokens than that.
    fn decode_window(
        &self,
        tokens: &[u32],
        start: usize,
        max_tokens: usize,
    ) -> Result<(usize, String)> {
        let limit = (start + max_tokens).min(tokens.len());

        (start + 1..=limit)
            .rev()
            .chain(limit + 1..=tokens.len())
            .find_map(|end| {
                self.bpe
                    .decode(tokens[start..end].to_vec())
                    .ok()
                    .map(|piece| (end, piece))
            })
            .ok_or_else(|| {
                ServiceError::Tokenizer(format!("tokens from {start} do not decode")).into()
            })
    }
}

/// Byte-length estimate: roughly 4 bytes per token
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCounter;

impl TokenCounter for HeuristicCounter {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        // Short non-empty text still costs a token
        (text.len() / 4).max(1)
    }
}
