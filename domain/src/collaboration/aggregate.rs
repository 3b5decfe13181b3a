//! Group preference aggregation

use crate::music::SkillLevel;
use crate::preference::{MoodPreference, PreferenceRecord, TempoPreference};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Upper bound of the compatibility heuristic
pub const MAX_COMPATIBILITY: f64 = 0.9;
const BASE_COMPATIBILITY: f64 = 0.5;
const COMPATIBILITY_STEP: f64 = 0.1;

/// What a group agrees on, and what any single member vetoes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPreferences {
    pub member_count: usize,
    pub genre_counts: BTreeMap<String, usize>,
    pub composer_counts: BTreeMap<String, usize>,
    /// Named by more than one member
    pub common_genres: BTreeSet<String>,
    pub common_composers: BTreeSet<String>,
    /// Union over all members
    pub avoid_genres: BTreeSet<String>,
    pub avoid_composers: BTreeSet<String>,
    pub skill_levels: BTreeSet<SkillLevel>,
    pub instruments: BTreeSet<String>,
    /// Most requested tempo; `None` on no requests or a tie
    pub tempo: Option<TempoPreference>,
    pub mood: Option<MoodPreference>,
    /// (hint, participant display name) in participant order
    pub start_hints: Vec<(String, String)>,
    pub end_hints: Vec<(String, String)>,
    pub specific_styles: BTreeSet<String>,
    /// 0.5 - 0.9
    pub compatibility: f64,
}

impl GroupPreferences {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PreferenceRecord>) -> Self {
        let mut group = Self {
            member_count: 0,
            genre_counts: BTreeMap::new(),
            composer_counts: BTreeMap::new(),
            common_genres: BTreeSet::new(),
            common_composers: BTreeSet::new(),
            avoid_genres: BTreeSet::new(),
            avoid_composers: BTreeSet::new(),
            skill_levels: BTreeSet::new(),
            instruments: BTreeSet::new(),
            tempo: None,
            mood: None,
            start_hints: Vec::new(),
            end_hints: Vec::new(),
            specific_styles: BTreeSet::new(),
            compatibility: BASE_COMPATIBILITY,
        };
        let mut tempos = Vec::new();
        let mut moods = Vec::new();

        for record in records {
            group.member_count += 1;
            for genre in &record.favorite_genres {
                *group.genre_counts.entry(genre.clone()).or_default() += 1;
            }
            for composer in &record.favorite_composers {
                *group.composer_counts.entry(composer.clone()).or_default() += 1;
            }
            group.avoid_genres.extend(record.avoid_genres.iter().cloned());
            group
                .avoid_composers
                .extend(record.avoid_composers.iter().cloned());
            group.skill_levels.insert(record.skill_level);
            group.instruments.extend(record.instruments.iter().cloned());
            group
                .specific_styles
                .extend(record.specific_styles.iter().cloned());
            tempos.extend(record.tempo);
            moods.extend(record.mood);
            if let Some(hint) = &record.start_hint {
                group
                    .start_hints
                    .push((hint.clone(), record.display_name.clone()));
            }
            if let Some(hint) = &record.end_hint {
                group
                    .end_hints
                    .push((hint.clone(), record.display_name.clone()));
            }
        }

        group.common_genres = common(&group.genre_counts);
        group.common_composers = common(&group.composer_counts);
        group.tempo = majority(&tempos);
        group.mood = majority(&moods);
        group.compatibility = (BASE_COMPATIBILITY
            + COMPATIBILITY_STEP * group.common_genres.len() as f64
            + COMPATIBILITY_STEP * group.common_composers.len() as f64)
            .min(MAX_COMPATIBILITY);
        group
    }

    /// Whether any member vetoed this genre or composer
    pub fn vetoes(&self, genre: &str, composer: &str) -> bool {
        let genre = genre.to_lowercase();
        let composer = composer.to_lowercase();
        self.avoid_genres
            .iter()
            .any(|g| genre.contains(&g.to_lowercase()))
            || self
                .avoid_composers
                .iter()
                .any(|c| composer.contains(&c.to_lowercase()))
    }
}

fn common(counts: &BTreeMap<String, usize>) -> BTreeSet<String> {
    counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(name, _)| name.clone())
        .collect()
}

fn majority<T: Copy + PartialEq>(values: &[T]) -> Option<T> {
    let mut tally: Vec<(T, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(v, _)| v == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((*value, 1)),
        }
    }
    let best = tally.iter().map(|(_, c)| *c).max()?;
    let mut leaders = tally.iter().filter(|(_, c)| *c == best);
    let first = leaders.next()?;
    if leaders.next().is_some() {
        None
    } else {
        Some(first.0)
    }
}
