//! Text completion port
//!
//! Defines the interface to the external text-completion service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a text-completion provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    #[error("Completion request timed out")]
    Timeout,

    #[error("Completion service rate limited")]
    RateLimited,
}

impl CompletionError {
    /// Check if retrying later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, CompletionError::Timeout | CompletionError::RateLimited)
    }
}

/// Text completion capability
///
/// This port defines how the application layer talks to a language model.
/// Every reply is untrusted: callers parse it heuristically and fall back
/// to defaults when it is unusable. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Complete `prompt`, optionally steered by a system instruction
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, CompletionError>;

    /// Human-readable provider name for logs
    fn provider_name(&self) -> &str {
        "completion"
    }
}
