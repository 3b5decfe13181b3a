//! Program requirements (read-only pipeline input)

use super::concert::ConcertType;
use super::skill::SkillLevel;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Target duration used when a request does not name one
pub const DEFAULT_TARGET_MINUTES: u32 = 60;

/// Longest program a request may ask for (ten hours)
pub const MAX_TARGET_MINUTES: u32 = 600;

/// Constraints a program must satisfy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    pub concert_type: ConcertType,
    pub target_duration_minutes: u32,
    #[serde(default)]
    pub instruments: Vec<String>,
    /// Hardest difficulty the performers can handle
    #[serde(default)]
    pub skill_ceiling: SkillLevel,
    /// Free-form hints ("more ballads", "something by Monk")
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Titles the performers already play and want excluded
    #[serde(default)]
    pub existing_repertoire: Vec<String>,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            concert_type: ConcertType::default(),
            target_duration_minutes: DEFAULT_TARGET_MINUTES,
            instruments: Vec::new(),
            skill_ceiling: SkillLevel::default(),
            preferences: Vec::new(),
            existing_repertoire: Vec::new(),
        }
    }
}

impl Requirements {
    pub fn new(concert_type: ConcertType, target_duration_minutes: u32) -> Self {
        Self {
            concert_type,
            target_duration_minutes,
            ..Default::default()
        }
    }

    pub fn with_instruments(mut self, instruments: Vec<String>) -> Self {
        self.instruments = instruments;
        self
    }

    pub fn with_skill(mut self, skill: SkillLevel) -> Self {
        self.skill_ceiling = skill;
        self
    }

    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_existing_repertoire(mut self, titles: Vec<String>) -> Self {
        self.existing_repertoire = titles;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.target_duration_minutes == 0 {
            return Err(DomainError::InvalidRequirements(
                "target duration must be greater than zero".to_string(),
            ));
        }
        if self.target_duration_minutes > MAX_TARGET_MINUTES {
            return Err(DomainError::InvalidRequirements(format!(
                "target duration of {} minutes exceeds the {} minute limit",
                self.target_duration_minutes, MAX_TARGET_MINUTES
            )));
        }
        Ok(())
    }

    pub fn duration_bucket(&self) -> DurationBucket {
        DurationBucket::for_minutes(self.target_duration_minutes)
    }

    pub fn excludes_title(&self, title: &str) -> bool {
        self.existing_repertoire
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(title.trim()))
    }

    /// Comma-separated instrument list, or "any instruments" when unspecified
    pub fn instrument_list(&self) -> String {
        if self.instruments.is_empty() {
            "any instruments".to_string()
        } else {
            self.instruments.join(", ")
        }
    }
}

/// Coarse program length category driving piece-length and count limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    /// Under 30 minutes
    Short,
    /// 30 to 59 minutes
    Standard,
    /// 60 minutes or more
    Extended,
}

impl DurationBucket {
    pub fn for_minutes(minutes: u32) -> Self {
        match minutes {
            0..30 => DurationBucket::Short,
            30..60 => DurationBucket::Standard,
            _ => DurationBucket::Extended,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Standard => "standard",
            DurationBucket::Extended => "extended",
        }
    }

    pub fn max_piece_minutes(&self) -> u32 {
        match self {
            DurationBucket::Short => 8,
            DurationBucket::Standard => 15,
            DurationBucket::Extended => 25,
        }
    }

    pub fn recommended_piece_count(&self) -> usize {
        match self {
            DurationBucket::Short => 4,
            DurationBucket::Standard => 6,
            DurationBucket::Extended => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_duration() {
        let req = Requirements::new(ConcertType::JazzConcert, 0);
        assert!(matches!(
            req.validate(),
            Err(DomainError::InvalidRequirements(_))
        ));
        assert!(Requirements::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_duration() {
        for minutes in [MAX_TARGET_MINUTES + 1, u32::MAX] {
            let req = Requirements::new(ConcertType::JazzConcert, minutes);
            assert!(matches!(
                req.validate(),
                Err(DomainError::InvalidRequirements(_))
            ));
        }
        assert!(
            Requirements::new(ConcertType::JazzConcert, MAX_TARGET_MINUTES)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_duration_buckets() {
        assert_eq!(DurationBucket::for_minutes(20), DurationBucket::Short);
        assert_eq!(DurationBucket::for_minutes(30), DurationBucket::Standard);
        assert_eq!(DurationBucket::for_minutes(59), DurationBucket::Standard);
        assert_eq!(DurationBucket::for_minutes(90), DurationBucket::Extended);
        assert_eq!(DurationBucket::Short.max_piece_minutes(), 8);
        assert_eq!(DurationBucket::Extended.recommended_piece_count(), 8);
    }

    #[test]
    fn test_excludes_title_case_insensitive() {
        let req = Requirements::default().with_existing_repertoire(vec!["So What".into()]);
        assert!(req.excludes_title("so what"));
        assert!(!req.excludes_title("All Blues"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let req: Requirements =
            serde_json::from_str(r#"{"concert_type":"jazz_concert","target_duration_minutes":30}"#)
                .unwrap();
        assert_eq!(req.skill_ceiling, SkillLevel::Intermediate);
        assert!(req.instruments.is_empty());
    }
}
