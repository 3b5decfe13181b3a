//! Text-completion adapters
//!
//! Implementations of the application's [`TextCompletion`] port.
//! [`OpenAiCompletion`] talks to any OpenAI-compatible chat endpoint;
//! [`OfflineCompletion`] never answers, so every advisor falls back to its
//! built-in picks.

mod offline;
mod openai;

pub use offline::OfflineCompletion;
pub use openai::OpenAiCompletion;

use crate::config::{FileCompletionConfig, ProviderKind};
use setlist_application::TextCompletion;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the configured completion adapter.
///
/// A missing API key or an unbuildable HTTP client degrades to
/// [`OfflineCompletion`] with a warning instead of failing startup.
pub fn build_completion(config: &FileCompletionConfig, offline: bool) -> Arc<dyn TextCompletion> {
    if offline || config.provider_kind() == ProviderKind::Offline {
        info!("Text completion disabled, advisors use built-in picks");
        return Arc::new(OfflineCompletion);
    }

    let Some(api_key) = config.resolve_api_key() else {
        warn!(
            env = %config.api_key_env,
            "No API key configured, running offline"
        );
        return Arc::new(OfflineCompletion);
    };

    match OpenAiCompletion::new(config, api_key) {
        Ok(adapter) => {
            info!(model = %config.model, base_url = %config.base_url, "Text completion ready");
            Arc::new(adapter)
        }
        Err(e) => {
            warn!("Text completion not available: {}", e);
            Arc::new(OfflineCompletion)
        }
    }
}
