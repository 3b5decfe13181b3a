//! Candidate piece entity
//!
//! A piece proposed for a program. Pieces are created during the Propose
//! phase, collect one score per advisor during Cross-Evaluate and are
//! consumed by synthesis; they never outlive a single pipeline run.

use super::skill::SkillLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Duration assumed when a proposal omits one
pub const DEFAULT_PIECE_MINUTES: u32 = 5;

/// A proposed piece with per-advisor scoring metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePiece {
    pub title: String,
    pub composer: String,
    pub duration_minutes: u32,
    pub difficulty: SkillLevel,
    pub key_signature: String,
    pub genre: String,
    /// Tempo/character label such as "ballad", "medium" or "up-tempo"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default)]
    pub instruments: Vec<String>,
    #[serde(default)]
    pub rationale: String,
    /// Advisor id -> score (0-10). Scales are not calibrated across advisors.
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

impl CandidatePiece {
    pub fn new(title: impl Into<String>, composer: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            composer: composer.into(),
            duration_minutes: DEFAULT_PIECE_MINUTES,
            difficulty: SkillLevel::default(),
            key_signature: "C major".to_string(),
            genre: "unspecified".to_string(),
            style: None,
            instruments: Vec::new(),
            rationale: String::new(),
            scores: BTreeMap::new(),
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    pub fn with_difficulty(mut self, difficulty: SkillLevel) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key_signature = key.into();
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_instruments(mut self, instruments: Vec<String>) -> Self {
        self.instruments = instruments;
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Record one advisor's score, replacing any earlier score from it
    pub fn record_score(&mut self, advisor: impl Into<String>, score: f64) {
        self.scores.insert(advisor.into(), score);
    }

    /// Mean of the recorded advisor scores, `None` when nobody scored the piece
    pub fn aggregate_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            None
        } else {
            Some(self.scores.values().sum::<f64>() / self.scores.len() as f64)
        }
    }

    /// Case-insensitive title comparison used for deduplication and exclusions
    pub fn same_title(&self, title: &str) -> bool {
        self.title.trim().eq_ignore_ascii_case(title.trim())
    }

    /// Whether a free-text hint ("blues", "ballad") names this piece's genre or style
    pub fn matches_hint(&self, hint: &str) -> bool {
        let hint = hint.trim().to_lowercase();
        if hint.is_empty() {
            return false;
        }
        let singular = hint.strip_suffix('s').unwrap_or(&hint).to_string();
        let genre = self.genre.to_lowercase();
        let style = self.style.as_deref().unwrap_or_default().to_lowercase();
        [hint.as_str(), singular.as_str()]
            .iter()
            .filter(|h| !h.is_empty())
            .any(|h| genre.contains(h) || (!style.is_empty() && style.contains(h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece() -> CandidatePiece {
        CandidatePiece::new("Blue Monk", "Thelonious Monk")
            .with_genre("blues")
            .with_style("medium")
            .with_duration(4)
    }

    #[test]
    fn test_aggregate_is_plain_mean() {
        let mut p = piece();
        assert_eq!(p.aggregate_score(), None);
        p.record_score("curator", 8.0);
        p.record_score("technical", 5.0);
        p.record_score("flow", 2.0);
        assert_eq!(p.aggregate_score(), Some(5.0));
    }

    #[test]
    fn test_record_score_replaces() {
        let mut p = piece();
        p.record_score("curator", 8.0);
        p.record_score("curator", 4.0);
        assert_eq!(p.scores.len(), 1);
        assert_eq!(p.aggregate_score(), Some(4.0));
    }

    #[test]
    fn test_matches_hint_on_genre_and_style() {
        let p = piece();
        assert!(p.matches_hint("blues"));
        assert!(p.matches_hint("Medium"));
        assert!(!p.matches_hint("ballad"));
        assert!(!p.matches_hint("   "));

        let ballad = CandidatePiece::new("Body and Soul", "Johnny Green")
            .with_genre("jazz")
            .with_style("ballad");
        assert!(ballad.matches_hint("ballads"));
    }

    #[test]
    fn test_same_title_ignores_case() {
        assert!(piece().same_title("blue monk "));
        assert!(!piece().same_title("Blue Train"));
    }
}
