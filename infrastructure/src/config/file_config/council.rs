//! Advisor council configuration from TOML (`[council]` section)
//!
//! ```toml
//! [council]
//! call_timeout_secs = 30
//! advisors = ["curator", "technical", "flow"]
//! ```

use super::ConfigIssue;
use serde::{Deserialize, Serialize};
use setlist_application::CouncilParams;
use setlist_application::config::DEFAULT_CALL_TIMEOUT_SECS;
use setlist_domain::AdvisorKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Bound for each advisor call
    pub call_timeout_secs: u64,
    /// Advisors taking part, in merge order
    pub advisors: Vec<String>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            advisors: AdvisorKind::all().iter().map(|k| k.id().to_string()).collect(),
        }
    }
}

impl FileCouncilConfig {
    /// Convert to application parameters, reporting values that were replaced
    pub fn to_params(&self) -> (CouncilParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut params = CouncilParams::default();

        if self.call_timeout_secs == 0 {
            issues.push(ConfigIssue::new(
                "council.call_timeout_secs",
                format!("timeout cannot be 0, using {}", DEFAULT_CALL_TIMEOUT_SECS),
            ));
        } else {
            params = params.with_call_timeout_secs(self.call_timeout_secs);
        }

        let mut kinds = Vec::new();
        for name in &self.advisors {
            match name.parse::<AdvisorKind>() {
                Ok(kind) => kinds.push(kind),
                Err(e) => issues.push(ConfigIssue::new("council.advisors", e)),
            }
        }
        if kinds.is_empty() {
            if !self.advisors.is_empty() {
                issues.push(ConfigIssue::new(
                    "council.advisors",
                    "no valid advisors, seating all three",
                ));
            }
        } else {
            params = params.with_advisors(kinds);
        }

        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_converts_cleanly() {
        let (params, issues) = FileCouncilConfig::default().to_params();
        assert!(issues.is_empty());
        assert_eq!(params, CouncilParams::default());
    }

    #[test]
    fn test_unknown_advisors_are_reported_and_skipped() {
        let config = FileCouncilConfig {
            call_timeout_secs: 8,
            advisors: vec!["technical".into(), "critic".into()],
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.call_timeout, Duration::from_secs(8));
        assert_eq!(params.advisors, vec![AdvisorKind::Technical]);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("critic"));
    }

    #[test]
    fn test_only_invalid_advisors_keeps_full_council() {
        let config = FileCouncilConfig {
            call_timeout_secs: 0,
            advisors: vec!["critic".into()],
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.advisors.len(), 3);
        assert_eq!(params.call_timeout, Duration::from_secs(30));
        assert_eq!(issues.len(), 3);
    }
}
