/// Example: split one file on structural boundaries and summarize it
///
/// Without OPENAI_API_KEY this only prints the chunks the splitter produces.
///
/// Run with: cargo run --example summarize_file -- path/to/Token.sol
use std::sync::Arc;

use anyhow::Result;
use docsum::{
    BoundarySplitter, DocumentSummarizer, LlmSettings, OpenAiClient, SummarizerConfig,
    TextSplitter, TiktokenCounter, TokenCounter,
};

const SAMPLE: &str = r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.0;

/// Minimal token
contract Token {
    mapping(address => uint256) balances;

    constructor(uint256 supply) {
        balances[msg.sender] = supply;
    }

    // moves tokens
    function transfer(address to, uint256 amount) external {
        balances[msg.sender] -= amount;
        balances[to] += amount;
    }
}
"#;

#[tokio::main]
async fn main() -> Result<()> {
    let (filename, content) = match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)?;
            (path, content)
        }
        None => ("Token.sol".to_string(), SAMPLE.to_string()),
    };

    let splitter = BoundarySplitter::solidity()?;
    let tokenizer = TiktokenCounter::cl100k()?;
    let chunks = splitter.split_text(&content)?;

    println!("=== {} ({} tokens) ===\n", filename, tokenizer.count(&content));
    for (i, chunk) in chunks.iter().enumerate() {
        println!("--- chunk {} ({} tokens) ---", i + 1, tokenizer.count(chunk));
        println!("{}\n", chunk);
    }

    let api_key = match std::env::var("OPENAI_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            println!("OPENAI_API_KEY not set, skipping summarization");
            return Ok(());
        }
    };

    let llm = OpenAiClient::new(&LlmSettings {
        api_key: Some(api_key),
        ..Default::default()
    })?;
    let summarizer =
        DocumentSummarizer::new(Arc::new(llm), Arc::new(tokenizer), SummarizerConfig::default())?;

    let summary = summarizer.summarize(&filename, &content, &splitter).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
