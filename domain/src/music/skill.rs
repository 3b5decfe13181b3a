//! Skill level value object
//!
//! One ladder is used for both a performer's skill and a piece's difficulty
//! tier, so "difficulty-appropriate" is a plain ordering comparison.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Skill tier of a performer, or difficulty tier of a piece (Value Object)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Professional,
}

impl SkillLevel {
    pub fn all() -> [SkillLevel; 4] {
        [
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
            SkillLevel::Professional,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Professional => "professional",
        }
    }

    /// Highest difficulty tier (1-10 scale) a performer at this level should take on
    pub fn max_difficulty_tier(&self) -> u8 {
        match self {
            SkillLevel::Beginner => 3,
            SkillLevel::Intermediate => 6,
            SkillLevel::Advanced => 9,
            SkillLevel::Professional => 10,
        }
    }

    /// Whether a piece at this difficulty makes a comfortable concert opener
    pub fn is_approachable(&self) -> bool {
        matches!(self, SkillLevel::Beginner | SkillLevel::Intermediate)
    }

    pub fn description(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "New to the instrument, basic technique",
            SkillLevel::Intermediate => {
                "Comfortable with basic technique, learning advanced skills"
            }
            SkillLevel::Advanced => "Strong technical foundation, complex pieces",
            SkillLevel::Professional => "Concert-level performance ability",
        }
    }

    pub fn technical_demands(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Low",
            SkillLevel::Intermediate => "Moderate",
            SkillLevel::Advanced => "High",
            SkillLevel::Professional => "Very High",
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SkillLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" | "novice" => Ok(SkillLevel::Beginner),
            "intermediate" | "medium" | "moderate" => Ok(SkillLevel::Intermediate),
            "advanced" | "hard" | "difficult" => Ok(SkillLevel::Advanced),
            "professional" | "expert" | "virtuoso" => Ok(SkillLevel::Professional),
            other => Err(DomainError::UnknownSkillLevel(other.to_string())),
        }
    }
}
