//! Program (final output of both design paths)

use super::piece::CandidatePiece;
use super::skill::SkillLevel;
use serde::{Deserialize, Serialize};

/// Rule that placed a piece into a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Moved or reserved for the first slot
    Opener,
    /// Reserved for the last slot
    Closer,
    /// Matched a genre or composer shared by several participants
    CommonPreference,
    /// Matched a participant's skill level
    SkillMatch,
    /// Ranked by advisor score
    Scored,
    /// Selected without any matching rule
    Default,
}

impl SelectionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionRule::Opener => "opener",
            SelectionRule::Closer => "closer",
            SelectionRule::CommonPreference => "common-preference",
            SelectionRule::SkillMatch => "skill-match",
            SelectionRule::Scored => "scored",
            SelectionRule::Default => "default",
        }
    }
}

impl std::fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A piece in its program slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramPiece {
    pub piece: CandidatePiece,
    pub rule: SelectionRule,
    pub rationale: String,
}

/// Summary of what one advisor contributed to a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorContribution {
    pub advisor: String,
    pub summary: String,
}

impl AdvisorContribution {
    pub fn new(advisor: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            advisor: advisor.into(),
            summary: summary.into(),
        }
    }
}

/// Ordered concert program with rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub total_duration_minutes: u32,
    pub pieces: Vec<ProgramPiece>,
    pub design_rationale: String,
    pub contributions: Vec<AdvisorContribution>,
    /// 0.0 - 1.0
    pub confidence: f64,
}

impl Program {
    /// Single-piece program returned when selection yields nothing usable
    pub fn placeholder(target_duration_minutes: u32) -> Self {
        let piece = CandidatePiece::new("Program to be finalized", "To be decided")
            .with_duration(5)
            .with_difficulty(SkillLevel::Beginner)
            .with_rationale("Placeholder while a full program is prepared");
        Self {
            title: "Custom Concert Program".to_string(),
            total_duration_minutes: piece.duration_minutes,
            pieces: vec![ProgramPiece {
                piece,
                rule: SelectionRule::Default,
                rationale: "No candidate fit the requirements".to_string(),
            }],
            design_rationale: format!(
                "Fallback program: no candidate pieces fit a {} minute target",
                target_duration_minutes
            ),
            contributions: Vec::new(),
            confidence: 0.1,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.pieces.len() == 1 && self.pieces[0].piece.composer == "To be decided"
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.pieces.iter().map(|p| p.piece.title.as_str()).collect()
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = &CandidatePiece> {
        self.pieces.iter().map(|p| &p.piece)
    }

    /// Sum of the slotted pieces' durations
    pub fn computed_duration(&self) -> u32 {
        self.pieces.iter().map(|p| p.piece.duration_minutes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_one_piece() {
        let program = Program::placeholder(45);
        assert_eq!(program.piece_count(), 1);
        assert!(program.is_placeholder());
        assert_eq!(program.total_duration_minutes, program.computed_duration());
        assert!(program.design_rationale.contains("45"));
    }

    #[test]
    fn test_selection_rule_serializes_snake_case() {
        let json = serde_json::to_string(&SelectionRule::CommonPreference).unwrap();
        assert_eq!(json, "\"common_preference\"");
        assert_eq!(SelectionRule::CommonPreference.to_string(), "common-preference");
    }
}
