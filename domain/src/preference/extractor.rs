//! Preference extraction from free text.
//!
//! Deterministic keyword heuristics: the same text always yields the same
//! record, and extraction never fails. Anything not recognised keeps its
//! neutral default (intermediate skill, empty sets, no tempo or mood).
//!
//! A matched term is routed to the avoid side when a negation marker
//! ("no", "avoid", "don't", "hate", "not", "dislike") appears within
//! [`NEGATION_WINDOW`] characters of it. Before the term the search stops at
//! any clause punctuation or "but". After the term it may cross a comma or a
//! question mark ("metal, no way", "Mozart? no thanks") but ignores a marker
//! that already governs a later vocabulary term ("jazz, no metal"). When a
//! value is both favoured and avoided in one text, the avoidance wins.

use super::record::PreferenceRecord;
use super::vocabulary::{
    COMPOSERS, GENRES, INSTRUMENTS, MOODS, NEGATION_MARKERS, NEGATION_WINDOW, SKILL_TIERS, STYLES,
    SynonymTable, TEMPOS, all_terms, find_term, find_word,
};
use crate::music::SkillLevel;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static START_HINT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:start|begin|open)(?:s|ing)?\s+(?:(?:the|our)\s+(?:set|show|concert|program|setlist)\s+)?with\s+([a-z][a-z' -]*)",
    )
    .ok()
});

static END_HINT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:end|finish|close)(?:s|ing)?\s+(?:(?:the|our)\s+(?:set|show|concert|program|setlist)\s+)?with\s+([a-z][a-z' -]*)",
    )
    .ok()
});

/// Words that terminate a start/end hint phrase
const HINT_STOP_WORDS: &[&str] = &[
    "and", "then", "but", "or", "please", "to", "end", "finish", "close", "start", "begin", "open",
];
const HINT_ARTICLES: &[&str] = &["a", "an", "the", "some"];
const HINT_MAX_WORDS: usize = 3;

/// Turns one participant's free text into a [`PreferenceRecord`]
pub struct PreferenceExtractor;

impl PreferenceExtractor {
    pub fn extract(participant_id: &str, display_name: &str, text: &str) -> PreferenceRecord {
        let text = normalize(text);
        let mut record = PreferenceRecord::neutral(participant_id, display_name);

        let (genres, avoid_genres) = classify(&text, GENRES);
        record.favorite_genres = genres;
        record.avoid_genres = avoid_genres;

        let (composers, avoid_composers) = classify(&text, COMPOSERS);
        record.favorite_composers = composers;
        record.avoid_composers = avoid_composers;

        record.instruments = Self::instruments(&text);
        record.skill_level = Self::skill_level(&text);
        record.tempo = first_affirmed(&text, TEMPOS);
        record.mood = first_affirmed(&text, MOODS);
        record.start_hint = hint(&text, &START_HINT);
        record.end_hint = hint(&text, &END_HINT);
        record.specific_styles = STYLES
            .iter()
            .filter(|style| affirmed(&text, style))
            .map(|style| style.to_string())
            .collect();

        record
    }

    /// Instruments mentioned without negation
    pub fn instruments(text: &str) -> BTreeSet<String> {
        let text = normalize(text);
        classify(&text, INSTRUMENTS).0
    }

    /// Skill tier named in the text, `Intermediate` when none is
    pub fn skill_level(text: &str) -> SkillLevel {
        let text = normalize(text);
        first_affirmed(&text, SKILL_TIERS).unwrap_or_default()
    }
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}

/// Split a synonym table into (favoured, avoided) canonical values
fn classify(text: &str, table: SynonymTable) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut favored = BTreeSet::new();
    let mut avoided = BTreeSet::new();

    for (canonical, terms) in table {
        let mut seen = false;
        let mut negated = false;
        for term in *terms {
            for pos in find_term(text, term) {
                seen = true;
                if is_negated(text, pos, term) {
                    negated = true;
                }
            }
        }
        if negated {
            avoided.insert(canonical.to_string());
        } else if seen {
            favored.insert(canonical.to_string());
        }
    }

    (favored, avoided)
}

fn first_affirmed<T: Copy>(text: &str, table: &[(T, &[&str])]) -> Option<T> {
    table
        .iter()
        .find(|(_, terms)| terms.iter().any(|term| affirmed(text, term)))
        .map(|(value, _)| *value)
}

fn affirmed(text: &str, term: &str) -> bool {
    find_term(text, term)
        .into_iter()
        .any(|pos| !is_negated(text, pos, term))
}

/// Whether a negation marker governs the term matched at `pos`
fn is_negated(text: &str, pos: usize, term: &str) -> bool {
    let prefix = &text[..pos];
    let mut lower = pos.saturating_sub(NEGATION_WINDOW);
    if let Some(i) = prefix.rfind([',', ';', '.', '!', '?']) {
        lower = lower.max(i + 1);
    }
    if let Some(i) = prefix.rfind(" but ") {
        lower = lower.max(i + " but ".len());
    }

    let mut end = pos + term.len();
    if text[end..].starts_with('s') {
        end += 1;
    }
    let suffix = &text[end..];
    let mut upper = end + suffix.len().min(NEGATION_WINDOW);
    if let Some(i) = suffix.find(['.', ';', '!']) {
        upper = upper.min(end + i);
    }
    if let Some(i) = suffix.find(" but ") {
        upper = upper.min(end + i);
    }

    NEGATION_MARKERS.iter().any(|marker| {
        find_word(text, marker).into_iter().any(|start| {
            let before = start >= lower && start + marker.len() <= pos;
            let after = start >= end
                && start + marker.len() <= upper
                && !governs_term(text, start + marker.len());
            before || after
        })
    })
}

/// Whether a vocabulary term follows a marker ending at `from` in its clause
fn governs_term(text: &str, from: usize) -> bool {
    let rest = &text[from..];
    let mut until = from + rest.len().min(NEGATION_WINDOW);
    if let Some(i) = rest.find([',', ';', '.', '!', '?']) {
        until = until.min(from + i);
    }
    if let Some(i) = rest.find(" but ") {
        until = until.min(from + i);
    }
    all_terms().any(|term| {
        find_term(text, term)
            .into_iter()
            .any(|start| start >= from && start < until)
    })
}

fn hint(text: &str, pattern: &Option<Regex>) -> Option<String> {
    let re = pattern.as_ref()?;
    let captured = re.captures(text)?.get(1)?.as_str();

    let words: Vec<&str> = captured
        .split_whitespace()
        .take_while(|w| !HINT_STOP_WORDS.contains(w))
        .skip_while(|w| HINT_ARTICLES.contains(w))
        .take(HINT_MAX_WORDS)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::record::{MoodPreference, TempoPreference};

    fn extract(text: &str) -> PreferenceRecord {
        PreferenceExtractor::extract("u1", "Alice", text)
    }

    #[test]
    fn test_empty_text_yields_neutral_record() {
        let record = extract("");
        assert_eq!(record, PreferenceRecord::neutral("u1", "Alice"));
        assert_eq!(record.skill_level, SkillLevel::Intermediate);
        assert!(record.tempo.is_none());
        assert!(record.mood.is_none());
    }

    #[test]
    fn test_favorite_genres_and_composers() {
        let record = extract("I love jazz and anything by Coltrane or Thelonious Monk");
        assert!(record.favorite_genres.contains("jazz"));
        assert!(record.favorite_composers.contains("John Coltrane"));
        assert!(record.favorite_composers.contains("Thelonious Monk"));
        assert!(record.avoid_genres.is_empty());
    }

    #[test]
    fn test_negation_routes_to_avoid() {
        let record = extract("avoid metal please");
        assert!(record.avoid_genres.contains("metal"));
        assert!(!record.favorite_genres.contains("metal"));

        let record = extract("Please, no heavy metal");
        assert!(record.avoid_genres.contains("metal"));
    }

    #[test]
    fn test_negation_is_clause_scoped() {
        let record = extract("I don't like Mozart, but I love Bach");
        assert!(record.avoid_composers.contains("Mozart"));
        assert!(record.favorite_composers.contains("J.S. Bach"));

        let record = extract("no rock but jazz is great");
        assert!(record.avoid_genres.contains("rock"));
        assert!(record.favorite_genres.contains("jazz"));
    }

    #[test]
    fn test_negation_after_term() {
        let record = extract("heavy metal, no way");
        assert!(record.avoid_genres.contains("metal"));
        assert!(record.favorite_genres.is_empty());

        let record = extract("metal is not for me");
        assert!(record.avoid_genres.contains("metal"));

        let record = extract("Mozart? no thanks");
        assert!(record.avoid_composers.contains("Mozart"));
        assert!(record.favorite_composers.is_empty());
    }

    #[test]
    fn test_trailing_marker_belongs_to_next_term() {
        let record = extract("I love jazz, no metal");
        assert!(record.favorite_genres.contains("jazz"));
        assert!(record.avoid_genres.contains("metal"));

        let record = extract("I play piano, not guitar");
        assert!(record.instruments.contains("piano"));
        assert!(!record.instruments.contains("guitar"));
    }

    #[test]
    fn test_trailing_marker_stops_at_sentence() {
        let record = extract("Jazz please. No idea about the rest");
        assert!(record.favorite_genres.contains("jazz"));

        let record = extract("rock but not today");
        assert!(record.favorite_genres.contains("rock"));
    }

    #[test]
    fn test_negation_window_is_bounded() {
        let record = extract("not sure about the setlist overall yet jazz sounds good");
        assert!(record.favorite_genres.contains("jazz"));
    }

    #[test]
    fn test_negation_marker_must_be_whole_word() {
        let record = extract("I play piano jazz");
        assert!(record.favorite_genres.contains("jazz"));
        assert!(record.instruments.contains("piano"));
        let record = extract("I know the blues");
        assert!(record.favorite_genres.contains("blues"));
    }

    #[test]
    fn test_avoidance_wins_over_favor() {
        let record = extract("I like rock. Actually, I hate rock");
        assert!(record.avoid_genres.contains("rock"));
        assert!(!record.favorite_genres.contains("rock"));
    }

    #[test]
    fn test_instruments_and_skill() {
        let record = extract("I'm a beginner on sax and I sing vocals");
        assert!(record.instruments.contains("saxophone"));
        assert!(record.instruments.contains("voice"));
        assert_eq!(record.skill_level, SkillLevel::Beginner);

        assert_eq!(
            extract("advanced cellist, play cello daily").skill_level,
            SkillLevel::Advanced
        );
        assert_eq!(
            extract("I'm a professional violinist").skill_level,
            SkillLevel::Professional
        );
        assert_eq!(
            extract("definitely not a beginner, advanced").skill_level,
            SkillLevel::Advanced
        );
    }

    #[test]
    fn test_tempo_and_mood() {
        let record = extract("fast and energetic tunes");
        assert_eq!(record.tempo, Some(TempoPreference::Fast));
        assert_eq!(record.mood, Some(MoodPreference::Energetic));

        let record = extract("something slow and peaceful");
        assert_eq!(record.tempo, Some(TempoPreference::Slow));
        assert_eq!(record.mood, Some(MoodPreference::Relaxed));

        assert_eq!(extract("not too fast").tempo, None);
    }

    #[test]
    fn test_order_hints() {
        let record = extract("start with blues, end with a ballad");
        assert_eq!(record.start_hint.as_deref(), Some("blues"));
        assert_eq!(record.end_hint.as_deref(), Some("ballad"));

        let record = extract("Let's open the set with some bebop and close with swing");
        assert_eq!(record.start_hint.as_deref(), Some("bebop"));
        assert_eq!(record.end_hint.as_deref(), Some("swing"));

        let record = extract("I like jazz");
        assert!(record.start_hint.is_none());
        assert!(record.end_hint.is_none());
    }

    #[test]
    fn test_specific_styles() {
        let record = extract("more ballads and some cool jazz, no fusion");
        assert!(record.specific_styles.contains("ballad"));
        assert!(record.specific_styles.contains("cool jazz"));
        assert!(!record.specific_styles.contains("fusion"));
    }

    #[test]
    fn test_curly_apostrophe_negation() {
        let record = extract("I don\u{2019}t want country");
        assert!(record.avoid_genres.contains("country"));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "love Monk, avoid EDM, start with a ballad";
        assert_eq!(extract(text), extract(text));
    }
}
