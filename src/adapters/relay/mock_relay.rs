//! Mock Suggestion Relay for testing.
//!
//! Queued answers are consumed in order; once the queue is empty the relay
//! answers with a fixed suggestion.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{RelayError, RelaySuggestion, SuggestionRelay};

type Answer = Result<RelaySuggestion, RelayError>;

/// Mock relay for testing.
#[derive(Debug, Clone)]
pub struct MockSuggestionRelay {
    answers: Arc<Mutex<VecDeque<Answer>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl Default for MockSuggestionRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSuggestionRelay {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful suggestion.
    pub fn with_suggestion(self, text: impl Into<String>) -> Self {
        self.with_answer(RelaySuggestion::new(text, "mock"))
    }

    /// Queues a full answer, including soft failures.
    pub fn with_answer(self, answer: RelaySuggestion) -> Self {
        lock(&self.answers).push_back(Ok(answer));
        self
    }

    /// Queues a hard failure.
    pub fn with_error(self, error: RelayError) -> Self {
        lock(&self.answers).push_back(Err(error));
        self
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Texts sent so far.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl SuggestionRelay for MockSuggestionRelay {
    async fn suggest(&self, text: &str) -> Result<RelaySuggestion, RelayError> {
        lock(&self.calls).push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let queued = lock(&self.answers).pop_front();
        queued.unwrap_or_else(|| Ok(RelaySuggestion::new("Mock suggestion", "mock")))
    }
}
