use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsum::corpus::write_output;
use docsum::{
    CorpusOptions, DocumentSummarizer, InputFormat, OpenAiClient, OutputFormat, Settings,
    TiktokenCounter, summarize_corpus,
};

/// Summarize every text, markdown and Solidity file under a directory
#[derive(Parser, Debug)]
#[command(name = "docsum")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to search for files
    #[arg(long)]
    dir: PathBuf,

    /// Input formats to summarize
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = vec![InputFormat::Text, InputFormat::Markdown, InputFormat::Solidity]
    )]
    exts: Vec<InputFormat>,

    /// Output file (ignored for stdout)
    #[arg(long, default_value = "summarization-results.json")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// JSON settings file; flags below take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Documents over this many tokens are summarized in parts
    #[arg(long)]
    token_budget: Option<usize>,

    #[arg(long)]
    sub_chunk_tokens: Option<usize>,

    /// Chunk summaries in flight at once
    #[arg(long)]
    batch_size: Option<usize>,

    /// Skip files that fail instead of aborting
    #[arg(long)]
    continue_on_error: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            token_budget: self.token_budget,
            sub_chunk_tokens: self.sub_chunk_tokens,
            batch_size: self.batch_size,
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so `--format stdout` stays parseable
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !args.dir.is_dir() {
        bail!("Invalid directory {}", args.dir.display());
    }

    let file_settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let settings = Settings::merge(file_settings, args.settings());

    let config = settings.summarizer_config()?;
    let llm = OpenAiClient::new(&settings.llm_settings())
        .context("Set OPENAI_API_KEY or pass --api-key")?;
    let tokenizer = TiktokenCounter::new(settings.tokenizer_name())?;
    info!(model = llm.model(), ?config, "Starting summarization");

    let summarizer = DocumentSummarizer::new(Arc::new(llm), Arc::new(tokenizer), config)?;

    let start = Instant::now();
    let corpus = summarize_corpus(
        &args.dir,
        &args.exts,
        &summarizer,
        CorpusOptions {
            continue_on_error: args.continue_on_error,
        },
    )
    .await?;

    let files: usize = corpus.values().map(|files| files.len()).sum();
    info!(
        files,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Summarization complete"
    );

    write_output(&corpus, &args.out, args.format)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    if args.format != OutputFormat::Stdout {
        info!("Wrote results to {}", args.out.display());
    }

    Ok(())
}
