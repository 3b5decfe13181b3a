//! Preference record (one participant's structured preferences)

use crate::music::SkillLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoPreference {
    Fast,
    Moderate,
    Slow,
}

impl TempoPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            TempoPreference::Fast => "fast",
            TempoPreference::Moderate => "moderate",
            TempoPreference::Slow => "slow",
        }
    }

    /// Catalog style label that suits this tempo
    pub fn matching_style(&self) -> &'static str {
        match self {
            TempoPreference::Fast => "up-tempo",
            TempoPreference::Moderate => "medium",
            TempoPreference::Slow => "ballad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodPreference {
    Energetic,
    Relaxed,
    Dramatic,
    Happy,
}

impl MoodPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodPreference::Energetic => "energetic",
            MoodPreference::Relaxed => "relaxed",
            MoodPreference::Dramatic => "dramatic",
            MoodPreference::Happy => "happy",
        }
    }
}

/// Structured preferences extracted from one participant's free text.
///
/// Records are immutable once built; a later submission from the same
/// participant replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    pub participant_id: String,
    pub display_name: String,
    pub favorite_genres: BTreeSet<String>,
    pub favorite_composers: BTreeSet<String>,
    pub avoid_genres: BTreeSet<String>,
    pub avoid_composers: BTreeSet<String>,
    pub instruments: BTreeSet<String>,
    pub skill_level: SkillLevel,
    pub tempo: Option<TempoPreference>,
    pub mood: Option<MoodPreference>,
    /// What the participant wants the program to open with
    pub start_hint: Option<String>,
    /// What the participant wants the program to close with
    pub end_hint: Option<String>,
    /// Narrow style requests ("bebop", "cool jazz", "ballad")
    pub specific_styles: BTreeSet<String>,
}

impl PreferenceRecord {
    /// Record with every field at its neutral default
    pub fn neutral(participant_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            display_name: display_name.into(),
            favorite_genres: BTreeSet::new(),
            favorite_composers: BTreeSet::new(),
            avoid_genres: BTreeSet::new(),
            avoid_composers: BTreeSet::new(),
            instruments: BTreeSet::new(),
            skill_level: SkillLevel::default(),
            tempo: None,
            mood: None,
            start_hint: None,
            end_hint: None,
            specific_styles: BTreeSet::new(),
        }
    }

    pub fn has_avoidances(&self) -> bool {
        !self.avoid_genres.is_empty() || !self.avoid_composers.is_empty()
    }
}
