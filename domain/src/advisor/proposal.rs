//! Candidate list parsing for Propose and Refine replies

use crate::music::{CandidatePiece, DEFAULT_PIECE_MINUTES, DurationBucket, Requirements, SkillLevel};
use serde::Deserialize;

/// Loose wire shape of one proposed piece; every field but the title is optional
#[derive(Debug, Deserialize)]
struct ProposedPiece {
    title: Option<String>,
    composer: Option<String>,
    #[serde(alias = "duration")]
    duration_minutes: Option<serde_json::Value>,
    #[serde(alias = "difficulty_level")]
    difficulty: Option<serde_json::Value>,
    #[serde(alias = "key")]
    key_signature: Option<String>,
    genre: Option<String>,
    style: Option<String>,
    #[serde(default)]
    instruments: Vec<String>,
    #[serde(alias = "reasoning")]
    rationale: Option<String>,
}

/// Extract the piece list from a model reply.
///
/// Accepts a bare JSON array or an object with a `pieces` array, optionally
/// wrapped in a fenced code block. Missing fields are filled from
/// `requirements` (difficulty = skill ceiling, instruments = requested set)
/// and a default duration. Entries without a title are dropped.
pub fn parse_piece_list(response: &str, requirements: &Requirements) -> Vec<CandidatePiece> {
    let Some(raw) = extract_json(response) else {
        return Vec::new();
    };

    let entries: Vec<ProposedPiece> = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => deserialize_entries(items),
        Ok(serde_json::Value::Object(mut map)) => match map.remove("pieces") {
            Some(serde_json::Value::Array(items)) => deserialize_entries(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|entry| into_candidate(entry, requirements))
        .collect()
}

fn deserialize_entries(items: Vec<serde_json::Value>) -> Vec<ProposedPiece> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

fn extract_json(response: &str) -> Option<&str> {
    let body = match response.find("```") {
        Some(fence) => {
            let after = &response[fence + 3..];
            let after = after.find('\n').map(|i| &after[i + 1..]).unwrap_or(after);
            after.find("```").map(|end| &after[..end]).unwrap_or(after)
        }
        None => response,
    };

    let start = body.find(['[', '{'])?;
    let closing = if body[start..].starts_with('[') { ']' } else { '}' };
    let end = body.rfind(closing)?;
    (end > start).then(|| &body[start..=end])
}

fn into_candidate(entry: ProposedPiece, requirements: &Requirements) -> Option<CandidatePiece> {
    let title = entry.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;

    let duration = entry
        .duration_minutes
        .as_ref()
        .and_then(value_as_minutes)
        .filter(|m| *m > 0)
        .unwrap_or(DEFAULT_PIECE_MINUTES);

    let difficulty = entry
        .difficulty
        .as_ref()
        .and_then(value_as_skill)
        .unwrap_or(requirements.skill_ceiling);

    let mut piece = CandidatePiece::new(
        title,
        entry.composer.unwrap_or_else(|| "Unknown".to_string()),
    )
    .with_duration(duration)
    .with_difficulty(difficulty)
    .with_genre(
        entry
            .genre
            .map(|g| g.to_lowercase())
            .unwrap_or_else(|| default_genre(requirements)),
    )
    .with_instruments(if entry.instruments.is_empty() {
        requirements.instruments.clone()
    } else {
        entry.instruments
    })
    .with_rationale(entry.rationale.unwrap_or_default());

    if let Some(key) = entry.key_signature {
        piece = piece.with_key(key);
    }
    if let Some(style) = entry.style {
        piece = piece.with_style(style.to_lowercase());
    }
    Some(piece)
}

/// Durations longer than the longest bucket allows are treated as missing
fn value_as_minutes(value: &serde_json::Value) -> Option<u32> {
    let max = DurationBucket::Extended.max_piece_minutes();
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(f64::round)
            .filter(|f| (0.0..=f64::from(max)).contains(f))
            .map(|f| f as u32),
        serde_json::Value::String(s) => s
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| !part.is_empty())
            .and_then(|digits| digits.parse::<u32>().ok())
            .filter(|m| *m <= max),
        _ => None,
    }
}

/// Accepts a tier name or a 1-10 difficulty number
fn value_as_skill(value: &serde_json::Value) -> Option<SkillLevel> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Number(n) => n.as_f64().map(|tier| {
            SkillLevel::all()
                .into_iter()
                .find(|level| tier <= f64::from(level.max_difficulty_tier()))
                .unwrap_or(SkillLevel::Professional)
        }),
        _ => None,
    }
}

fn default_genre(requirements: &Requirements) -> String {
    use crate::music::ConcertType;
    match requirements.concert_type {
        ConcertType::JazzConcert => "jazz",
        ConcertType::ClassicalRecital | ConcertType::SoloPerformance => "classical",
        ConcertType::ChamberMusic => "chamber",
        ConcertType::FolkConcert => "folk",
    }
    .to_string()
}
