//! Mock Proxy Relay for testing.
//!
//! Provides a configurable implementation of the ProxyRelay port so the
//! SALIC client can be exercised without network access.
//!
//! # Features
//!
//! - Queued payloads and errors (consumed in order)
//! - A fallback answer once the queue is empty
//! - Simulated delays for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let proxy = MockProxyRelay::new("primary")
//!     .with_error(ProxyError::status(503))
//!     .with_payload(json!({"projetos": []}));
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ProxyError, ProxyRelay};

type Answer = Result<Value, ProxyError>;

/// Mock relay for testing.
#[derive(Debug, Clone)]
pub struct MockProxyRelay {
    name: String,
    queue: Arc<Mutex<VecDeque<Answer>>>,
    fallback: Answer,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockProxyRelay {
    /// Creates a mock that fails with a network error unless configured.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Err(ProxyError::network("mock relay unreachable")),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful payload.
    pub fn with_payload(self, payload: Value) -> Self {
        lock(&self.queue).push_back(Ok(payload));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ProxyError) -> Self {
        lock(&self.queue).push_back(Err(error));
        self
    }

    /// Answer once the queue is exhausted.
    pub fn with_fallback_payload(mut self, payload: Value) -> Self {
        self.fallback = Ok(payload);
        self
    }

    /// Error once the queue is exhausted.
    pub fn with_fallback_error(mut self, error: ProxyError) -> Self {
        self.fallback = Err(error);
        self
    }

    /// Simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Target URLs requested so far.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl ProxyRelay for MockProxyRelay {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, target_url: &str) -> Result<Value, ProxyError> {
        lock(&self.calls).push(target_url.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let queued = lock(&self.queue).pop_front();
        queued.unwrap_or_else(|| self.fallback.clone())
    }
}
