//! Remote assistant integration for free-form chat questions.
//!
//! Defines the `Assistant` trait and the HTTP implementation. Failures
//! are reported to the caller, which turns them into a fallback reply.

pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    Request(String),

    #[error("Assistant returned HTTP {0}")]
    Status(u16),

    #[error("Failed to decode assistant response: {0}")]
    Decode(String),
}

/// Abstraction over the remote assistant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Ask a question. `Ok(None)` means the service answered without
    /// anything usable.
    async fn ask(&self, query: &str) -> Result<Option<String>, AssistantError>;
}
