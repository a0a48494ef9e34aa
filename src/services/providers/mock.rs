//! Mock provider implementations for testing.

use super::{ProviderError, SpeechProvider, TextProvider};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock text provider. Counts the calls that would have gone out over
/// the network; an unconfigured provider fails before counting.
pub struct MockTextProvider {
    configured: bool,
    response: Value,
    calls: AtomicUsize,
}

impl MockTextProvider {
    pub fn new(configured: bool) -> Self {
        Self {
            configured,
            response: json!({"ok": true}),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _instruction: &str) -> Result<Value, ProviderError> {
        if !self.configured {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not configured".to_string(),
            ));
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Mock speech provider with the same counting behavior.
pub struct MockSpeechProvider {
    configured: bool,
    response: Result<Value, (u16, String)>,
    calls: AtomicUsize,
}

impl MockSpeechProvider {
    pub fn new(configured: bool) -> Self {
        Self {
            configured,
            response: Ok(json!({"ok": true})),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response_value(mut self, response: Value) -> Self {
        self.response = Ok(response);
        self
    }

    /// Make the provider fail as if the upstream returned `status` with
    /// the given body text.
    pub fn with_upstream_error(mut self, status: u16, details: &str) -> Self {
        self.response = Err((status, details.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, _text: &str, _voice_name: &str) -> Result<Value, ProviderError> {
        if !self.configured {
            return Err(ProviderError::NotConfigured(
                "Mock speech provider not configured".to_string(),
            ));
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(value) => Ok(value.clone()),
            Err((status, details)) => Err(ProviderError::Upstream {
                status: *status,
                details: details.clone(),
            }),
        }
    }
}
