//! Advisor variants
//!
//! The three advisors share one control flow; an [`AdvisorKind`] only
//! selects the data that differs between them (identity, analysis notes,
//! prompt focus and fallback picks).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorKind {
    Curator,
    Technical,
    Flow,
}

impl AdvisorKind {
    pub fn all() -> [AdvisorKind; 3] {
        [AdvisorKind::Curator, AdvisorKind::Technical, AdvisorKind::Flow]
    }

    /// Stable identifier used as the score-map key
    pub fn id(&self) -> &'static str {
        match self {
            AdvisorKind::Curator => "curator",
            AdvisorKind::Technical => "technical",
            AdvisorKind::Flow => "flow",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdvisorKind::Curator => "Music Curator",
            AdvisorKind::Technical => "Technical Advisor",
            AdvisorKind::Flow => "Program Flow",
        }
    }

    pub fn role(&self) -> &'static str {
        match self {
            AdvisorKind::Curator => "Piece Selection Specialist",
            AdvisorKind::Technical => "Performance Feasibility Specialist",
            AdvisorKind::Flow => "Program Flow Specialist",
        }
    }

    pub fn expertise(&self) -> &'static str {
        match self {
            AdvisorKind::Curator => "Repertoire knowledge, difficulty assessment and audience appeal",
            AdvisorKind::Technical => {
                "Technical difficulty, performance logistics and practical constraints"
            }
            AdvisorKind::Flow => "Pacing, contrast, key and tempo progression across a program",
        }
    }

    /// What this advisor weighs when it scores a piece
    pub fn scoring_focus(&self) -> &'static str {
        match self {
            AdvisorKind::Curator => {
                "musical quality, fit with the concert type and the performers' preferences"
            }
            AdvisorKind::Technical => {
                "whether the performers can play it well at their skill level with their instruments"
            }
            AdvisorKind::Flow => {
                "how the piece's length, tempo and character would contribute to the program's pacing"
            }
        }
    }
}

impl std::fmt::Display for AdvisorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for AdvisorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "curator" | "music_curator" => Ok(AdvisorKind::Curator),
            "technical" | "technical_advisor" => Ok(AdvisorKind::Technical),
            "flow" | "program_flow" => Ok(AdvisorKind::Flow),
            other => Err(format!("unknown advisor: {}", other)),
        }
    }
}
