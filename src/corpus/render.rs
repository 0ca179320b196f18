use std::fmt::Write as _;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{CorpusSummary, InputFormat};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Stdout,
}

pub fn render_json(corpus: &CorpusSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(corpus)?)
}

pub fn render_markdown(corpus: &CorpusSummary) -> String {
    let mut out = String::new();

    for (category, files) in corpus {
        let heading = InputFormat::from_category(category)
            .map(InputFormat::title)
            .unwrap_or(category.as_str());
        let _ = write!(out, "# {heading}\n\n");

        for (path, doc) in files {
            let _ = write!(out, "## {path}\n\n");
            let _ = write!(out, "Summary: {}\n\n", doc.global_summary);

            for chunk in doc.chunked_summaries.values() {
                let _ = write!(out, "### {}\n\n{}\n\n", chunk.title, chunk.summary);
            }
        }
    }

    out
}

/// Write to `out`, or print JSON for [`OutputFormat::Stdout`]
pub fn write_output(corpus: &CorpusSummary, out: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => std::fs::write(out, render_json(corpus)?)?,
        OutputFormat::Markdown => std::fs::write(out, render_markdown(corpus))?,
        OutputFormat::Stdout => println!("{}", render_json(corpus)?),
    }
    Ok(())
}
