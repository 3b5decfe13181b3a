use async_trait::async_trait;
use setlist_application::{CompletionError, TextCompletion};

/// Completion adapter that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCompletion;

#[async_trait]
impl TextCompletion for OfflineCompletion {
    async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable("offline mode".to_string()))
    }

    fn provider_name(&self) -> &str {
        "offline"
    }
}
