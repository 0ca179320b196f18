//! Language-model seam: the trait the summarizers call, an HTTP client, and the
//! map-reduce summarization chain.

mod client;
mod error;
pub mod prompts;
mod retry;
mod types;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use futures::future::join_all;

pub use client::OpenAiClient;
pub use error::ServiceError;
pub use retry::{RetryConfig, with_retry};
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Single prompt in, completion text out
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;

    /// Summarize a document that has already been cut into units.
    /// The default is a map-reduce over `generate`.
    async fn summarize(&self, units: &[String]) -> Result<String, ServiceError> {
        map_reduce(self, units).await
    }
}

/// Concise-summarize every unit concurrently, then summarize the joined
/// partial summaries once more. A single unit skips the reduce step.
pub async fn map_reduce<M>(model: &M, units: &[String]) -> Result<String, ServiceError>
where
    M: LanguageModel + ?Sized,
{
    match units {
        [] => Ok(String::new()),
        [only] => model.generate(&prompts::concise_summary(only)).await,
        _ => {
            let mapped = join_all(
                units
                    .iter()
                    .map(|unit| async move { model.generate(&prompts::concise_summary(unit)).await }),
            )
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

            tracing::debug!(parts = mapped.len(), "Reducing partial summaries");
            model
                .generate(&prompts::concise_summary(&mapped.join("\n\n")))
                .await
        }
    }
}
