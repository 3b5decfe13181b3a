//! Pipeline phases and the annotations recorded while running them

use crate::advisor::AdvisorKind;
use serde::{Deserialize, Serialize};

/// Phase of an advisor council run; each phase is a barrier for the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Every advisor reads the requirements
    Analyze,
    /// Every advisor proposes candidate pieces
    Propose,
    /// Every advisor scores every deduplicated candidate
    Evaluate,
    /// Scores are merged into a program
    Synthesize,
}

impl Phase {
    pub fn all() -> [Phase; 4] {
        [Phase::Analyze, Phase::Propose, Phase::Evaluate, Phase::Synthesize]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Phase::Analyze => "analyze",
            Phase::Propose => "propose",
            Phase::Evaluate => "evaluate",
            Phase::Synthesize => "synthesize",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Analyze => "Analysis",
            Phase::Propose => "Proposals",
            Phase::Evaluate => "Cross-Evaluation",
            Phase::Synthesize => "Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Something worth reporting about a phase (usually a degraded call)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseNote {
    pub phase: Phase,
    pub advisor: Option<AdvisorKind>,
    pub message: String,
}

impl PhaseNote {
    pub fn new(phase: Phase, advisor: Option<AdvisorKind>, message: impl Into<String>) -> Self {
        Self {
            phase,
            advisor,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PhaseNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.advisor {
            Some(advisor) => write!(f, "[{}] {}: {}", self.phase, advisor.name(), self.message),
            None => write!(f, "[{}] {}", self.phase, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_display() {
        let note = PhaseNote::new(Phase::Propose, Some(AdvisorKind::Flow), "used fallback list");
        assert_eq!(note.to_string(), "[Proposals] Program Flow: used fallback list");
        let note = PhaseNote::new(Phase::Synthesize, None, "placeholder program");
        assert_eq!(note.to_string(), "[Synthesis] placeholder program");
    }
}
