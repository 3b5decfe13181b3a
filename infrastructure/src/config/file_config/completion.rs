//! Text-completion configuration from TOML (`[completion]` section)
//!
//! ```toml
//! [completion]
//! provider = "openai"            # or "offline"
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! temperature = 0.2
//! max_tokens = 2048
//! request_timeout_secs = 60
//! ```

use super::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Which text-completion adapter to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Any OpenAI-compatible `/chat/completions` endpoint
    OpenAi,
    /// No service; advisors use their built-in picks
    Offline,
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "openai-compatible" => Ok(ProviderKind::OpenAi),
            "offline" | "none" => Ok(ProviderKind::Offline),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    /// "openai" or "offline"
    pub provider: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key (default: "OPENAI_API_KEY")
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    /// Sampling temperature, 0.0 - 2.0
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Transport-level timeout for one HTTP request
    pub request_timeout_secs: u64,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            temperature: 0.2,
            max_tokens: Some(2048),
            request_timeout_secs: 60,
        }
    }
}

impl FileCompletionConfig {
    /// Parse the provider name, defaulting to OpenAI on unknown values
    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.parse().unwrap_or(ProviderKind::OpenAi)
    }

    /// API key from the config file, else from the configured env var
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if let Err(e) = self.provider.parse::<ProviderKind>() {
            issues.push(ConfigIssue::new(
                "completion.provider",
                format!("{}, falling back to 'openai'", e),
            ));
        }
        if self.model.trim().is_empty() {
            issues.push(ConfigIssue::new("completion.model", "model name cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(ConfigIssue::new(
                "completion.temperature",
                format!("{} is outside 0.0 - 2.0", self.temperature),
            ));
        }
        if self.request_timeout_secs == 0 {
            issues.push(ConfigIssue::new(
                "completion.request_timeout_secs",
                "timeout cannot be 0",
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!("OpenAI".parse::<ProviderKind>(), Ok(ProviderKind::OpenAi));
        assert_eq!("offline".parse::<ProviderKind>(), Ok(ProviderKind::Offline));
        assert!("bedrock".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_unknown_provider_falls_back_to_openai() {
        let config = FileCompletionConfig {
            provider: "bedrock".into(),
            ..Default::default()
        };
        assert_eq!(config.provider_kind(), ProviderKind::OpenAi);
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_inline_api_key_wins() {
        let config = FileCompletionConfig {
            api_key: Some("sk-inline".into()),
            api_key_env: "SETLIST_TEST_UNSET_KEY_VAR".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-inline"));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = FileCompletionConfig {
            api_key: Some("  ".into()),
            api_key_env: "SETLIST_TEST_UNSET_KEY_VAR".into(),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(), None);
    }
}
