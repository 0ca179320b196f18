use regex::Regex;

use crate::error::{PipelineError, Result};

/// A boundary occurrence found by [`BoundaryMatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryMatch<'t> {
    /// Matched text: leading comment lines plus the full keyword line
    pub text: &'t str,
    /// Byte offset of the match in the searched text
    pub start: usize,
}

impl BoundaryMatch<'_> {
    /// Byte offset one past the end of the match
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Recognizes boundary lines: a run of directly preceding `//` comment lines
/// (or a single `/* ... */` line) followed by a line containing a keyword.
///
/// Keywords match as plain substrings, so `function` also matches inside
/// `dysfunctional`. Keywords are escaped before compilation.
#[derive(Debug, Clone)]
pub struct BoundaryMatcher {
    pattern: Regex,
}

impl BoundaryMatcher {
    /// Compile a matcher from keyword tokens. Order only affects readability.
    pub fn compile<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();

        if keywords.is_empty() {
            return Err(PipelineError::config("boundary keyword set is empty"));
        }
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(PipelineError::config("boundary keywords must be non-empty"));
        }

        let alternation = keywords
            .iter()
            .map(|k| format!("({})", regex::escape(k)))
            .collect::<Vec<_>>()
            .join("|");

        // `.` never crosses a newline, so each `.*` stays on one line
        let source = format!(r"(((.*//.*\n)*)|(.*/\*.*\n))(.*({alternation}).*)");
        let pattern = Regex::new(&source)
            .map_err(|e| PipelineError::config(format!("boundary pattern: {e}")))?;

        Ok(Self { pattern })
    }

    /// First boundary occurrence at or after `cursor`, earliest by start offset
    pub fn match_boundary_at<'t>(&self, text: &'t str, cursor: usize) -> Option<BoundaryMatch<'t>> {
        self.pattern.find_at(text, cursor).map(|m| BoundaryMatch {
            text: m.as_str(),
            start: m.start(),
        })
    }

    /// First boundary occurrence anywhere in `text`
    pub fn match_boundary<'t>(&self, text: &'t str) -> Option<BoundaryMatch<'t>> {
        self.match_boundary_at(text, 0)
    }
}
