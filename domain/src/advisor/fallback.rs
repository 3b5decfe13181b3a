//! Built-in proposals used when an advisor cannot reach the completion service

use super::kind::AdvisorKind;
use crate::music::{CandidatePiece, ConcertType, Requirements, SkillLevel};

/// (title, composer, minutes, genre, style, difficulty, key)
type Seed = (&'static str, &'static str, u32, &'static str, &'static str, SkillLevel, &'static str);

const JAZZ: &[Seed] = &[
    ("Summertime", "George Gershwin", 5, "jazz", "ballad", SkillLevel::Beginner, "A minor"),
    ("C Jam Blues", "Duke Ellington", 4, "blues", "medium", SkillLevel::Beginner, "C major"),
    ("Autumn Leaves", "Joseph Kosma", 4, "jazz", "ballad", SkillLevel::Intermediate, "G minor"),
    ("Take the A Train", "Billy Strayhorn", 4, "jazz", "up-tempo", SkillLevel::Intermediate, "C major"),
    ("So What", "Miles Davis", 6, "jazz", "up-tempo", SkillLevel::Advanced, "D dorian"),
];

const CLASSICAL: &[Seed] = &[
    ("Minuet in G", "J.S. Bach", 2, "baroque", "dance", SkillLevel::Beginner, "G major"),
    ("Für Elise", "Beethoven", 3, "classical", "lyrical", SkillLevel::Intermediate, "A minor"),
    ("Air on the G String", "J.S. Bach", 4, "baroque", "lyrical", SkillLevel::Intermediate, "D major"),
    ("Clair de Lune", "Debussy", 5, "romantic", "lyrical", SkillLevel::Advanced, "D-flat major"),
];

const CHAMBER: &[Seed] = &[
    ("Canon in D", "Pachelbel", 5, "chamber", "lyrical", SkillLevel::Beginner, "D major"),
    ("Eine kleine Nachtmusik, I.", "Mozart", 6, "chamber", "lively", SkillLevel::Intermediate, "G major"),
    ("Piano Trio No. 1", "Brahms", 10, "chamber", "dramatic", SkillLevel::Advanced, "B major"),
];

const FOLK: &[Seed] = &[
    ("Shenandoah", "Traditional", 4, "folk", "ballad", SkillLevel::Beginner, "D major"),
    ("Scarborough Fair", "Traditional", 3, "folk", "ballad", SkillLevel::Beginner, "D dorian"),
    ("Whiskey Before Breakfast", "Traditional", 3, "folk", "up-tempo", SkillLevel::Intermediate, "D major"),
];

impl AdvisorKind {
    /// Small hard-coded proposal list, never empty.
    ///
    /// Curator offers the signature pieces, Technical only what the
    /// performers can play (the easiest piece when nothing qualifies) and
    /// Flow one piece per contrasting style.
    pub fn fallback_pieces(&self, requirements: &Requirements) -> Vec<CandidatePiece> {
        let seeds = seeds_for(requirements.concert_type);

        let picked: Vec<&Seed> = match self {
            AdvisorKind::Curator => seeds.iter().take(3).collect(),
            AdvisorKind::Technical => {
                let playable: Vec<&Seed> = seeds
                    .iter()
                    .filter(|s| s.5 <= requirements.skill_ceiling)
                    .collect();
                if playable.is_empty() {
                    seeds.iter().min_by_key(|s| s.5).into_iter().collect()
                } else {
                    playable
                }
            }
            AdvisorKind::Flow => {
                let mut styles = Vec::new();
                seeds
                    .iter()
                    .filter(|s| {
                        if styles.contains(&s.4) {
                            false
                        } else {
                            styles.push(s.4);
                            true
                        }
                    })
                    .collect()
            }
        };

        picked
            .into_iter()
            .map(|seed| to_piece(seed, self, requirements))
            .collect()
    }
}

fn seeds_for(concert: ConcertType) -> &'static [Seed] {
    match concert {
        ConcertType::JazzConcert => JAZZ,
        ConcertType::ClassicalRecital | ConcertType::SoloPerformance => CLASSICAL,
        ConcertType::ChamberMusic => CHAMBER,
        ConcertType::FolkConcert => FOLK,
    }
}

fn to_piece(seed: &Seed, kind: &AdvisorKind, requirements: &Requirements) -> CandidatePiece {
    let (title, composer, minutes, genre, style, difficulty, key) = *seed;
    CandidatePiece::new(title, composer)
        .with_duration(minutes)
        .with_genre(genre)
        .with_style(style)
        .with_difficulty(difficulty)
        .with_key(key)
        .with_instruments(requirements.instruments.clone())
        .with_rationale(format!("{} fallback suggestion", kind.name()))
}
