use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::chunker::{BoundaryMatcher, BoundarySplitter};
use crate::error::PipelineError;
use crate::llm::mock::MockModel;
use crate::llm::prompts;
use crate::tokenizer::{HeuristicCounter, TokenCounter};

/// One token per byte
struct ByteCounter;

impl TokenCounter for ByteCounter {
    fn count(&self, text: &str) -> usize {
        text.len()
    }
}

fn byte_budget(model: &Arc<MockModel>) -> DocumentSummarizer {
    let config = SummarizerConfig {
        token_budget: 10,
        sub_chunk_tokens: 4,
        ..Default::default()
    };
    DocumentSummarizer::new(model.clone(), Arc::new(ByteCounter), config).unwrap()
}

fn summarizer(model: &Arc<MockModel>, config: SummarizerConfig) -> DocumentSummarizer {
    DocumentSummarizer::new(model.clone(), Arc::new(HeuristicCounter), config).unwrap()
}

fn functions(n: usize) -> String {
    (0..n).map(|i| format!("function f{i}() {{}}\n")).collect()
}

#[test]
fn test_batching_small() {
    let batcher = Batcher::new(3).unwrap();
    let items = vec!["chunk1", "chunk2", "chunk3", "chunk4", "chunk5"];

    let batches = batcher.split(&items);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0], &["chunk1", "chunk2", "chunk3"]);
    assert_eq!(batches[1], &["chunk4", "chunk5"]);
}

#[test]
fn test_batching_empty() {
    let batcher = Batcher::new(100).unwrap();
    let items: Vec<String> = vec![];
    assert!(batcher.split(&items).is_empty());
}

#[test]
fn test_zero_batch_size_rejected() {
    assert!(matches!(Batcher::new(0), Err(PipelineError::Configuration(_))));
}

#[test]
fn test_config_defaults_and_validation() {
    let config = SummarizerConfig::default();
    assert_eq!(config.token_budget, 3000);
    assert_eq!(config.sub_chunk_tokens, 1500);
    assert_eq!(config.batch_size, 10);
    assert!(config.validate().is_ok());

    for bad in [
        SummarizerConfig { token_budget: 0, ..config },
        SummarizerConfig { sub_chunk_tokens: 0, ..config },
        SummarizerConfig { batch_size: 0, ..config },
        SummarizerConfig { sub_chunk_tokens: 4000, ..config },
    ] {
        assert!(matches!(bad.validate(), Err(PipelineError::Configuration(_))));
    }
}

#[tokio::test]
async fn test_chunk_summary_calls_title_then_detail() {
    let model = Arc::new(MockModel::new());
    let chunks = ChunkSummarizer::new(model.clone(), Arc::new(HeuristicCounter));

    let summary = chunks.summarize("function transfer() {}").await.unwrap();

    assert_eq!(summary.title, "function transfer() {}");
    assert_eq!(summary.summary, "details of function transfer() {}");
    assert_eq!(summary.content, "function transfer() {}");
    assert_eq!(
        summary.tokens,
        TokenCounts {
            summary: HeuristicCounter.count("details of function transfer() {}"),
            content: HeuristicCounter.count("function transfer() {}"),
        }
    );

    let prompts_sent = model.prompts();
    assert_eq!(prompts_sent.len(), 2);
    assert!(prompts::is_title_prompt(&prompts_sent[0]));
    assert!(prompts::is_detail_prompt(&prompts_sent[1]));
}

#[tokio::test]
async fn test_batch_bound_holds() {
    let model = Arc::new(MockModel::new().with_delay(Duration::from_millis(20)));
    let config = SummarizerConfig {
        batch_size: 4,
        ..Default::default()
    };
    let splitter = BoundarySplitter::javascript().unwrap();

    let doc = summarizer(&model, config)
        .summarize("lib.js", &functions(10), &splitter)
        .await
        .unwrap();

    assert_eq!(doc.chunked_summaries.len(), 10);
    // a full batch overlaps completely, and nothing from the next batch joins it
    assert_eq!(model.max_in_flight(), 4);
}

#[tokio::test]
async fn test_batch_size_one_is_sequential() {
    let model = Arc::new(MockModel::new().with_delay(Duration::from_millis(5)));
    let config = SummarizerConfig {
        batch_size: 1,
        ..Default::default()
    };
    let splitter = BoundarySplitter::javascript().unwrap();

    summarizer(&model, config)
        .summarize("lib.js", &functions(3), &splitter)
        .await
        .unwrap();

    assert_eq!(model.max_in_flight(), 1);
    // one global call plus two per chunk
    assert_eq!(model.calls(), 7);
}

#[tokio::test]
async fn test_chunk_order_is_preserved() {
    let model = Arc::new(MockModel::new().with_delay(Duration::from_millis(1)));
    let config = SummarizerConfig {
        batch_size: 3,
        ..Default::default()
    };

    let map = summarizer(&model, config)
        .summarize_chunks(&functions(7).lines().map(str::to_string).collect::<Vec<_>>())
        .await
        .unwrap();

    let titles: Vec<_> = map.keys().cloned().collect();
    let expected: Vec<_> = (0..7).map(|i| format!("function f{i}() {{}}")).collect();
    assert_eq!(titles, expected);
}

#[tokio::test]
async fn test_global_summary_at_budget_is_direct() {
    let model = Arc::new(MockModel::new());

    byte_budget(&model).global_summary("aaa\nbbb\ncc").await.unwrap();

    assert_eq!(model.summarize_inputs(), vec![vec!["aaa\nbbb\ncc".to_string()]]);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_global_summary_over_budget_is_split() {
    let model = Arc::new(MockModel::new());

    byte_budget(&model).global_summary("aaa\nbbb\nccc").await.unwrap();

    let inputs = model.summarize_inputs();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0], vec!["aaa\n", "bbb\n", "ccc"]);
    assert!(inputs[0].iter().all(|part| ByteCounter.count(part) <= 4));
    // three map calls and one reduce
    assert_eq!(model.calls(), 4);
}

#[tokio::test]
async fn test_over_budget_single_line_is_cut_to_sub_chunk_size() {
    let model = Arc::new(MockModel::new());
    let content = "x".repeat(11);

    byte_budget(&model).global_summary(&content).await.unwrap();

    let inputs = model.summarize_inputs();
    let parts = &inputs[0];
    assert_eq!(parts, &vec!["xxxx", "xxxx", "xxx"]);
    assert!(parts.iter().all(|part| ByteCounter.count(part) <= 4));
    assert_eq!(parts.concat(), content);
}

#[tokio::test]
async fn test_global_summary_of_blank_document_is_empty() {
    let model = Arc::new(MockModel::new());
    let summary = summarizer(&model, Default::default())
        .global_summary("  \n ")
        .await
        .unwrap();

    assert_eq!(summary, "");
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_title_collision_keeps_later_chunk() {
    let model = Arc::new(MockModel::new());
    let splitter = BoundarySplitter::javascript().unwrap();
    let content = "function f() {}\nA\nfunction f() {}\nB\n";

    let doc = summarizer(&model, Default::default())
        .summarize("dup.js", content, &splitter)
        .await
        .unwrap();

    assert_eq!(doc.chunked_summaries.len(), 1);
    let entry = &doc.chunked_summaries["function f() {}"];
    assert_eq!(entry.content, "function f() {}\nB");
}

#[tokio::test]
async fn test_end_to_end_contract() {
    let model = Arc::new(MockModel::new());
    let matcher =
        BoundaryMatcher::compile(["contract", "function", "interface", "constructor"]).unwrap();
    let content = "// license\ncontract A {\n  function f() {}\n}\n";

    let doc = summarize_document(
        "A.sol",
        content,
        &matcher,
        model.clone(),
        Arc::new(HeuristicCounter),
        SummarizerConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(doc.filename, "A.sol");
    assert_eq!(doc.global_summary, "concise summary");
    assert_eq!(doc.chunked_summaries.len(), 2);
    for entry in doc.chunked_summaries.values() {
        assert!(!entry.summary.is_empty());
        assert!(!entry.content.is_empty());
    }

    let json = serde_json::to_value(&doc).unwrap();
    assert!(json.get("globalSummary").is_some());
    assert!(json.get("chunkedSummaries").is_some());
}

#[tokio::test]
async fn test_failure_aborts_later_batches() {
    let needle = prompts::detailed_summary("function f3").trim_end().to_string();
    let model = Arc::new(MockModel::new().failing_on(needle));
    let config = SummarizerConfig {
        batch_size: 2,
        ..Default::default()
    };
    let splitter = BoundarySplitter::javascript().unwrap();

    let err = summarizer(&model, config)
        .summarize("lib.js", &functions(5), &splitter)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::ExternalService(_)));
    // global, batch [f0, f1], batch [f2, f3]; f4 never starts
    assert_eq!(model.calls(), 1 + 4 + 4);
    assert!(
        !model
            .prompts()
            .iter()
            .any(|p| prompts::is_title_prompt(p) && p.contains("function f4"))
    );
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let model = Arc::new(MockModel::new());
    let result = DocumentSummarizer::new(
        model,
        Arc::new(HeuristicCounter),
        SummarizerConfig {
            batch_size: 0,
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(PipelineError::Configuration(_))));
}
