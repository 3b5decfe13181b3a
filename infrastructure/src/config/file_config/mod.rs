//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod completion;
mod council;
mod output;

pub use completion::{FileCompletionConfig, ProviderKind};
pub use council::FileCouncilConfig;
pub use output::FileOutputConfig;

use serde::{Deserialize, Serialize};

/// A problem found in an otherwise loadable configuration.
///
/// Issues never abort loading; the affected value falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Dotted path of the offending key, e.g. `council.call_timeout_secs`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Text-completion provider settings
    pub completion: FileCompletionConfig,
    /// Advisor council settings
    pub council: FileCouncilConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.completion.validate());
        issues.extend(self.council.to_params().1);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_domain::{AdvisorKind, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[completion]
provider = "openai"
base_url = "http://localhost:11434/v1"
model = "llama3.1"
temperature = 0.7

[council]
call_timeout_secs = 12
advisors = ["flow", "curator"]

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.provider, "openai");
        assert_eq!(config.completion.model, "llama3.1");
        assert_eq!(config.completion.base_url, "http://localhost:11434/v1");
        assert_eq!(config.council.call_timeout_secs, 12);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);

        let (params, issues) = config.council.to_params();
        assert!(issues.is_empty());
        assert_eq!(params.advisors, vec![AdvisorKind::Flow, AdvisorKind::Curator]);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[completion]
model = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.model, "gpt-4o");
        // Defaults should apply
        assert_eq!(config.completion.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.council.call_timeout_secs, 30);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let mut config = FileConfig::default();
        config.completion.provider = "carrier-pigeon".into();
        config.completion.temperature = 3.5;
        config.council.call_timeout_secs = 0;

        let fields: Vec<String> = config.validate().into_iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec![
                "completion.provider",
                "completion.temperature",
                "council.call_timeout_secs"
            ]
        );
    }
}
