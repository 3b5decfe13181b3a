//! Fixed vocabularies used by the preference heuristics.
//!
//! Each table maps a canonical value to the words that signal it. Terms are
//! lower-case and matched as whole words (an optional plural `s` is allowed).

use super::record::{MoodPreference, TempoPreference};
use crate::music::SkillLevel;

pub type SynonymTable = &'static [(&'static str, &'static [&'static str])];

pub const GENRES: SynonymTable = &[
    ("jazz", &["jazz", "swing", "fusion", "jazzy"]),
    ("bebop", &["bebop", "bop", "hard bop"]),
    ("blues", &["blues", "bluesy"]),
    ("classical", &["classical", "baroque", "romantic"]),
    ("chamber", &["chamber"]),
    ("rock", &["rock", "pop", "alternative"]),
    ("metal", &["metal", "heavy metal", "thrash"]),
    ("folk", &["folk", "acoustic", "traditional"]),
    ("country", &["country", "bluegrass"]),
    ("electronic", &["electronic", "edm", "techno"]),
    ("latin", &["latin", "salsa", "bossa nova", "samba"]),
];

/// Canonical names are spelled the way the built-in catalogs spell them
pub const COMPOSERS: SynonymTable = &[
    ("Miles Davis", &["miles davis"]),
    ("John Coltrane", &["john coltrane", "coltrane"]),
    ("Thelonious Monk", &["thelonious monk", "monk"]),
    ("Herbie Hancock", &["herbie hancock", "hancock"]),
    ("Charlie Parker", &["charlie parker", "parker"]),
    ("Horace Silver", &["horace silver"]),
    ("Sonny Rollins", &["sonny rollins", "rollins"]),
    ("Kenny Dorham", &["kenny dorham", "dorham"]),
    ("Paul Desmond", &["paul desmond", "desmond"]),
    ("Tadd Dameron", &["tadd dameron", "dameron"]),
    ("Lou Donaldson", &["lou donaldson"]),
    ("Duke Ellington", &["duke ellington", "ellington"]),
    ("J.S. Bach", &["bach", "j.s. bach", "johann sebastian bach"]),
    ("Mozart", &["mozart"]),
    ("Beethoven", &["beethoven"]),
    ("Chopin", &["chopin"]),
    ("Debussy", &["debussy"]),
    ("Brahms", &["brahms"]),
];

pub const INSTRUMENTS: SynonymTable = &[
    ("piano", &["piano", "keyboard", "keys"]),
    ("guitar", &["guitar", "acoustic guitar", "electric guitar"]),
    ("violin", &["violin", "fiddle"]),
    ("cello", &["cello"]),
    ("viola", &["viola"]),
    ("flute", &["flute"]),
    ("clarinet", &["clarinet"]),
    ("saxophone", &["saxophone", "sax", "alto sax", "tenor sax"]),
    ("trumpet", &["trumpet"]),
    ("drums", &["drums", "drum set", "percussion"]),
    ("bass", &["bass", "upright bass", "double bass", "bass guitar"]),
    ("voice", &["voice", "vocal", "vocals", "singer", "singing"]),
];

pub const STYLES: &[&str] = &[
    "bebop", "blues", "ballad", "swing", "fusion", "hard bop", "cool jazz", "free jazz",
];

/// Checked in order; the first tier with a non-negated hit wins
pub const SKILL_TIERS: &[(SkillLevel, &[&str])] = &[
    (
        SkillLevel::Beginner,
        &["beginner", "novice", "new to", "just started", "starting out", "learning"],
    ),
    (
        SkillLevel::Professional,
        &["professional", "virtuoso", "expert", "master"],
    ),
    (SkillLevel::Advanced, &["advanced", "experienced", "skilled"]),
    (SkillLevel::Intermediate, &["intermediate"]),
];

pub const TEMPOS: &[(TempoPreference, &[&str])] = &[
    (
        TempoPreference::Fast,
        &["fast", "upbeat", "up-tempo", "uptempo", "quick", "lively"],
    ),
    (
        TempoPreference::Slow,
        &["slow", "calm", "gentle", "mellow", "laid-back"],
    ),
    (
        TempoPreference::Moderate,
        &["moderate", "medium", "balanced", "mid-tempo"],
    ),
];

pub const MOODS: &[(MoodPreference, &[&str])] = &[
    (
        MoodPreference::Energetic,
        &["energetic", "exciting", "dynamic", "powerful"],
    ),
    (
        MoodPreference::Relaxed,
        &["relaxed", "relaxing", "peaceful", "serene"],
    ),
    (
        MoodPreference::Dramatic,
        &["dramatic", "intense", "emotional", "passionate"],
    ),
    (
        MoodPreference::Happy,
        &["happy", "cheerful", "uplifting", "joyful"],
    ),
];

pub const NEGATION_MARKERS: &[&str] = &["no", "avoid", "don't", "hate", "not", "dislike"];

/// Characters searched on either side of a matched term for a negation marker
pub const NEGATION_WINDOW: usize = 20;

/// Every term of every table, in table order
pub fn all_terms() -> impl Iterator<Item = &'static str> {
    let synonyms = [GENRES, COMPOSERS, INSTRUMENTS]
        .into_iter()
        .flat_map(|table| table.iter().flat_map(|(_, terms)| terms.iter().copied()));
    let skills = SKILL_TIERS.iter().flat_map(|(_, terms)| terms.iter().copied());
    let tempos = TEMPOS.iter().flat_map(|(_, terms)| terms.iter().copied());
    let moods = MOODS.iter().flat_map(|(_, terms)| terms.iter().copied());
    synonyms
        .chain(STYLES.iter().copied())
        .chain(skills)
        .chain(tempos)
        .chain(moods)
}

/// Byte offsets of every whole-word occurrence of `term` in `text`.
///
/// `text` must already be lower-case. A trailing plural `s` is accepted.
pub fn find_term(text: &str, term: &str) -> Vec<usize> {
    word_positions(text, term, true)
}

/// Byte offsets of `word` as a whole word (no plural allowance)
pub fn find_word(text: &str, word: &str) -> Vec<usize> {
    word_positions(text, word, false)
}

pub fn contains_word(text: &str, word: &str) -> bool {
    !find_word(text, word).is_empty()
}

fn word_positions(text: &str, term: &str, allow_plural: bool) -> Vec<usize> {
    if term.is_empty() {
        return Vec::new();
    }
    text.match_indices(term)
        .filter(|(start, _)| {
            let end = start + term.len();
            let before_ok = text[..*start]
                .chars()
                .next_back()
                .is_none_or(|c| !is_word_char(c));
            let rest = &text[end..];
            let rest = if allow_plural {
                rest.strip_prefix('s').unwrap_or(rest)
            } else {
                rest
            };
            let after_ok = rest.chars().next().is_none_or(|c| !is_word_char(c));
            before_ok && after_ok
        })
        .map(|(start, _)| start)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}
