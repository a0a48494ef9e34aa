//! Upstream provider abstractions and implementations.
//!
//! The gateway talks to the generative API through these traits so the
//! handlers can be exercised against mocks.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Non-2xx response from the upstream API. `details` is the raw
    /// response body, captured as text without a decode attempt.
    #[error("Upstream API error {status}: {details}")]
    Upstream { status: u16, details: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid upstream payload: {0}")]
    InvalidPayload(String),
}

/// Trait for text generation providers.
///
/// The returned value is the decoded upstream response body, relayed to
/// the client without transformation.
#[async_trait]
pub trait TextProvider: Send + Sync {
    async fn generate(&self, instruction: &str) -> Result<Value, ProviderError>;
}

/// Trait for speech synthesis providers.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    async fn synthesize(&self, text: &str, voice_name: &str) -> Result<Value, ProviderError>;
}
