//! Directory-level driver: find files per input format, summarize them one at a
//! time and collect the results by category.

mod render;


use std::path::{Path, PathBuf};

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

pub use render::{OutputFormat, render_json, render_markdown, write_output};

use crate::chunker::{BoundarySplitter, RecursiveSplitter, TextSplitter};
use crate::error::Result;
use crate::summarizer::{DocumentSummarizer, DocumentSummary};

/// category -> file path -> summary, in discovery order
pub type CorpusSummary = IndexMap<String, IndexMap<String, DocumentSummary>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Text,
    Markdown,
    Solidity,
}

impl InputFormat {
    pub const ALL: [InputFormat; 3] = [Self::Text, Self::Markdown, Self::Solidity];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Solidity => "sol",
        }
    }

    /// Key used in the corpus output
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Markdown => "markdown",
            Self::Solidity => "solidity",
        }
    }

    /// Heading used in markdown output
    pub fn title(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Markdown => "Markdown",
            Self::Solidity => "Solidity",
        }
    }

    pub fn splitter(self) -> Result<Box<dyn TextSplitter>> {
        let splitter: Box<dyn TextSplitter> = match self {
            Self::Text => Box::new(RecursiveSplitter::text()),
            Self::Markdown => Box::new(RecursiveSplitter::markdown()),
            Self::Solidity => Box::new(BoundarySplitter::solidity()?),
        };
        Ok(splitter)
    }

    pub fn from_category(category: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == category)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusOptions {
    /// Log and skip a failing document instead of aborting the run
    pub continue_on_error: bool,
}

/// Files under `dir` whose extension is exactly `extension`, sorted
pub fn find_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();

        if entry.file_type().is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(extension)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

pub async fn summarize_corpus(
    dir: &Path,
    formats: &[InputFormat],
    summarizer: &DocumentSummarizer,
    options: CorpusOptions,
) -> Result<CorpusSummary> {
    let mut discovered = Vec::with_capacity(formats.len());
    for &format in formats {
        let files = find_files(dir, format.extension())?;
        info!("Found {} {} files", files.len(), format.as_str());
        discovered.push((format, files));
    }

    let mut corpus = CorpusSummary::new();

    for (format, files) in discovered {
        let splitter = format.splitter()?;
        let mut summaries = IndexMap::with_capacity(files.len());

        for path in files {
            let filename = path.display().to_string();

            match summarize_file(&path, &filename, summarizer, splitter.as_ref()).await {
                Ok(summary) => {
                    summaries.insert(filename, summary);
                }
                Err(e) if options.continue_on_error => {
                    warn!(file = %filename, error = %e, "Skipping file");
                }
                Err(e) => return Err(e),
            }
        }

        corpus.insert(format.as_str().to_string(), summaries);
    }

    Ok(corpus)
}

async fn summarize_file(
    path: &Path,
    filename: &str,
    summarizer: &DocumentSummarizer,
    splitter: &dyn TextSplitter,
) -> Result<DocumentSummary> {
    let content = tokio::fs::read_to_string(path).await?;
    summarizer.summarize(filename, &content, splitter).await
}
