//! Application-level configuration.
//!
//! Controls how the advisor council behaves: which advisors sit on it and
//! how long a single advisor call may take.

use serde::{Deserialize, Serialize};
use setlist_domain::AdvisorKind;
use std::time::Duration;

/// Default bound for one text-completion call
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Council behavior parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilParams {
    /// Maximum time to wait for a single advisor call before falling back.
    pub call_timeout: Duration,
    /// Advisors taking part, in the order their proposals are merged.
    pub advisors: Vec<AdvisorKind>,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
            advisors: AdvisorKind::all().to_vec(),
        }
    }
}

impl CouncilParams {
    pub fn with_call_timeout_secs(mut self, seconds: u64) -> Self {
        self.call_timeout = Duration::from_secs(seconds);
        self
    }

    /// Keep the given advisors in order, dropping duplicates
    pub fn with_advisors(mut self, advisors: impl IntoIterator<Item = AdvisorKind>) -> Self {
        self.advisors.clear();
        for kind in advisors {
            if !self.advisors.contains(&kind) {
                self.advisors.push(kind);
            }
        }
        self
    }
}
