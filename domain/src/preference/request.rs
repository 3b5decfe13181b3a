//! Requirements extraction from an organizer's group request

use super::extractor::PreferenceExtractor;
use super::vocabulary::contains_word;
use crate::music::{ConcertType, DEFAULT_TARGET_MINUTES, MAX_TARGET_MINUTES, Requirements};
use regex::Regex;
use std::sync::LazyLock;

static DURATION: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(hours?|hrs?|minutes?|mins?)\b").ok()
});

/// Keyword groups checked in order; the first group with a hit decides the type
const CONCERT_KEYWORDS: &[(ConcertType, &[&str])] = &[
    (ConcertType::JazzConcert, &["jazz", "blues", "swing", "bebop"]),
    (
        ConcertType::ClassicalRecital,
        &["classical", "baroque", "romantic", "sonata", "concerto"],
    ),
    (
        ConcertType::ChamberMusic,
        &["chamber", "quartet", "trio", "ensemble"],
    ),
    (ConcertType::SoloPerformance, &["solo", "recital"]),
    (
        ConcertType::FolkConcert,
        &["folk", "traditional", "acoustic"],
    ),
];

/// Derives [`Requirements`] from free text such as
/// "let's plan a 45 minute jazz set for piano and bass"
pub struct RequirementsParser;

impl RequirementsParser {
    pub fn parse(text: &str) -> Requirements {
        let lower = text.to_lowercase();
        Requirements::new(Self::concert_type(&lower), Self::duration_minutes(&lower))
            .with_instruments(PreferenceExtractor::instruments(&lower).into_iter().collect())
            .with_skill(PreferenceExtractor::skill_level(&lower))
    }

    /// First "N minutes" / "N hours" mention, 60 minutes when absent or zero.
    ///
    /// Values past [`MAX_TARGET_MINUTES`] are clamped to it.
    pub fn duration_minutes(text: &str) -> u32 {
        let lower = text.to_lowercase();
        let Some(re) = DURATION.as_ref() else {
            return DEFAULT_TARGET_MINUTES;
        };
        let Some(caps) = re.captures(&lower) else {
            return DEFAULT_TARGET_MINUTES;
        };

        let value: u32 = caps
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        let is_hours = caps.get(2).is_some_and(|m| m.as_str().starts_with('h'));
        let minutes = if is_hours {
            value.saturating_mul(60)
        } else {
            value
        };

        if minutes == 0 {
            DEFAULT_TARGET_MINUTES
        } else {
            minutes.min(MAX_TARGET_MINUTES)
        }
    }

    pub fn concert_type(text: &str) -> ConcertType {
        let lower = text.to_lowercase();
        CONCERT_KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| contains_word(&lower, w)))
            .map(|(concert, _)| *concert)
            .unwrap_or_default()
    }
}
