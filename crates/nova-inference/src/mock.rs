//! Mock generation backend for deterministic testing.
//!
//! Records every request and returns a canned response, so tests can assert
//! on call counts (cache hits, minimum-content gates) and on prompt
//! contents without a live provider.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use nova_core::{Error, GenerationBackend, GenerationRequest, Result};

/// Configurable mock [`GenerationBackend`].
#[derive(Clone)]
pub struct MockBackend {
    response: Arc<Mutex<String>>,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
    healthy: Arc<AtomicBool>,
    failing: Arc<AtomicBool>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a mock that answers every request with a fixed string.
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new("Mock response".to_string())),
            calls: Arc::new(Mutex::new(Vec::new())),
            healthy: Arc::new(AtomicBool::new(true)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the canned response.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        *self.response.lock().unwrap() = response.into();
        self
    }

    /// Make every generation call fail with an `AiService` error.
    pub fn with_failure(self) -> Self {
        self.failing.store(true, Ordering::SeqCst);
        self
    }

    /// Make the health check report the provider as down.
    pub fn with_unavailable(self) -> Self {
        self.healthy.store(false, Ordering::SeqCst);
        self
    }

    /// Change the canned response after construction.
    pub fn set_response(&self, response: impl Into<String>) {
        *self.response.lock().unwrap() = response.into();
    }

    /// Number of generation calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Copies of every recorded request.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, req: GenerationRequest) -> Result<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::AiService("mock backend failure".to_string()));
        }
        self.calls.lock().unwrap().push(req);
        Ok(self.response.lock().unwrap().clone())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
