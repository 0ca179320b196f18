// Scripted model shared by the summarizer tests
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{LanguageModel, ServiceError, map_reduce, prompts};

#[derive(Default)]
pub(crate) struct MockModel {
    delay: Duration,
    fail_on: Option<String>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    summarize_inputs: Mutex<Vec<Vec<String>>>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every call open for `delay` so overlapping calls can be observed
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fail any prompt containing `needle`
    pub fn failing_on(mut self, needle: impl Into<String>) -> Self {
        self.fail_on = Some(needle.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn summarize_inputs(&self) -> Vec<Vec<String>> {
        self.summarize_inputs.lock().unwrap().clone()
    }

    fn reply(prompt: &str) -> String {
        // prompt body starts on the second line
        let first_line = prompt.lines().nth(1).unwrap_or_default().trim();
        if prompts::is_title_prompt(prompt) {
            first_line.to_string()
        } else if prompts::is_detail_prompt(prompt) {
            format!("details of {first_line}")
        } else {
            "concise summary".to_string()
        }
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.fail_on {
            Some(needle) if prompt.contains(needle.as_str()) => {
                Err(ServiceError::ServerError(format!("scripted failure on {needle}")))
            }
            _ => Ok(Self::reply(prompt)),
        }
    }

    async fn summarize(&self, units: &[String]) -> Result<String, ServiceError> {
        self.summarize_inputs.lock().unwrap().push(units.to_vec());
        map_reduce(self, units).await
    }
}
