//! Preference-driven selection for group sessions

use super::ProgramSynthesizer;
use crate::collaboration::GroupPreferences;
use crate::core::string::join_or_none;
use crate::music::{
    AdvisorContribution, CandidatePiece, Program, ProgramPiece, Requirements, SelectionRule,
};

/// Share of the target duration a collaborative program may fill
pub const COLLABORATIVE_BUDGET_RATIO: f64 = 0.9;

const COMMON_GENRE_POINTS: u32 = 3;
const COMMON_COMPOSER_POINTS: u32 = 5;
const SKILL_MATCH_POINTS: u32 = 2;
const TEMPO_MATCH_POINTS: u32 = 1;

struct Ranked {
    piece: CandidatePiece,
    points: u32,
    rule: SelectionRule,
    reasons: Vec<String>,
}

impl ProgramSynthesizer {
    /// Build a group program from a catalog pool.
    ///
    /// Vetoed genres/composers are removed outright, the rest ranked by
    /// shared preferences. Start/end hints reserve the outer slots when a
    /// matching piece fits the budget; the middle is filled greedily. Never
    /// fails: an empty selection yields [`Program::placeholder`].
    pub fn collaborative_program(
        pool: Vec<CandidatePiece>,
        group: &GroupPreferences,
        requirements: &Requirements,
    ) -> Program {
        let budget = COLLABORATIVE_BUDGET_RATIO * f64::from(requirements.target_duration_minutes);
        let fits = |minutes: u32| f64::from(minutes) <= budget;

        let mut ranked: Vec<Ranked> = Vec::new();
        for piece in pool {
            if group.vetoes(&piece.genre, &piece.composer)
                || ranked.iter().any(|r| r.piece.same_title(&piece.title))
            {
                continue;
            }
            ranked.push(rank(piece, group));
        }
        ranked.sort_by(|a, b| b.points.cmp(&a.points));

        let opener = group.start_hints.iter().find_map(|(hint, _)| {
            ranked
                .iter()
                .position(|r| r.piece.matches_hint(hint) && fits(r.piece.duration_minutes))
                .map(|idx| (idx, hint.clone()))
        });
        let mut opener = opener.map(|(idx, hint)| (ranked.remove(idx), hint));
        let opener_minutes = opener.as_ref().map_or(0, |(r, _)| r.piece.duration_minutes);

        let closer = group.end_hints.iter().find_map(|(hint, _)| {
            ranked
                .iter()
                .position(|r| {
                    r.piece.matches_hint(hint)
                        && fits(opener_minutes.saturating_add(r.piece.duration_minutes))
                })
                .map(|idx| (idx, hint.clone()))
        });
        let mut closer = closer.map(|(idx, hint)| (ranked.remove(idx), hint));

        let mut used = opener_minutes
            .saturating_add(closer.as_ref().map_or(0, |(r, _)| r.piece.duration_minutes));
        let mut slots: Vec<ProgramPiece> = Vec::new();

        if let Some((mut r, hint)) = opener.take() {
            r.reasons.insert(0, format!("Opens with {} as requested", hint));
            slots.push(into_slot(r, Some(SelectionRule::Opener)));
        }
        for r in ranked {
            let next = used.saturating_add(r.piece.duration_minutes);
            if fits(next) {
                used = next;
                slots.push(into_slot(r, None));
            }
        }
        if let Some((mut r, hint)) = closer.take() {
            r.reasons.insert(0, format!("Closes with {} as requested", hint));
            slots.push(into_slot(r, Some(SelectionRule::Closer)));
        }

        if slots.is_empty() {
            let mut program = Program::placeholder(requirements.target_duration_minutes);
            program.confidence = group.compatibility;
            return program;
        }

        let total = slots
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.piece.duration_minutes));
        Program {
            title: format!(
                "Collaborative {} Setlist",
                requirements.concert_type.display_name()
            ),
            total_duration_minutes: total,
            design_rationale: collaborative_rationale(group),
            contributions: collaborative_contributions(group),
            confidence: group.compatibility,
            pieces: slots,
        }
    }
}

fn rank(piece: CandidatePiece, group: &GroupPreferences) -> Ranked {
    let genre = piece.genre.to_lowercase();
    let composer = piece.composer.to_lowercase();
    let mut points = 0;
    let mut reasons = Vec::new();
    let mut rule = SelectionRule::Default;

    if group
        .common_composers
        .iter()
        .any(|c| composer.contains(&c.to_lowercase()))
    {
        points += COMMON_COMPOSER_POINTS;
        reasons.push(format!("Group favorite composer {}", piece.composer));
        rule = SelectionRule::CommonPreference;
    }
    if group
        .common_genres
        .iter()
        .any(|g| genre.contains(&g.to_lowercase()))
    {
        points += COMMON_GENRE_POINTS;
        reasons.push(format!("Popular {} choice", piece.genre));
        rule = SelectionRule::CommonPreference;
    }
    if group.skill_levels.contains(&piece.difficulty) {
        points += SKILL_MATCH_POINTS;
        reasons.push(format!("Appropriate for {} skill level", piece.difficulty));
        if rule == SelectionRule::Default {
            rule = SelectionRule::SkillMatch;
        }
    }
    if let Some(tempo) = group.tempo
        && piece.style.as_deref() == Some(tempo.matching_style())
    {
        points += TEMPO_MATCH_POINTS;
        reasons.push(format!("Fits the group's {} tempo preference", tempo.as_str()));
    }

    Ranked {
        piece,
        points,
        rule,
        reasons,
    }
}

fn into_slot(ranked: Ranked, rule: Option<SelectionRule>) -> ProgramPiece {
    let rationale = if ranked.reasons.is_empty() {
        "Classic piece that works well for group performance".to_string()
    } else {
        ranked.reasons.join("; ")
    };
    ProgramPiece {
        piece: ranked.piece,
        rule: rule.unwrap_or(ranked.rule),
        rationale,
    }
}

fn collaborative_rationale(group: &GroupPreferences) -> String {
    let genres: Vec<&String> = group.common_genres.iter().collect();
    let composers: Vec<&String> = group.common_composers.iter().collect();
    let skills: Vec<&str> = group.skill_levels.iter().map(|s| s.as_str()).collect();
    let instruments: Vec<&String> = group.instruments.iter().collect();
    format!(
        "Designed for {} group members with compatibility score {:.1}. \
         Common preferences: {} genres, {} composers. Skill levels: {}. Instruments: {}.",
        group.member_count,
        group.compatibility,
        join_or_none(&genres),
        join_or_none(&composers),
        join_or_none(&skills),
        join_or_none(&instruments),
    )
}

fn collaborative_contributions(group: &GroupPreferences) -> Vec<AdvisorContribution> {
    let skills: Vec<&str> = group.skill_levels.iter().map(|s| s.as_str()).collect();
    let genres: Vec<&String> = group.common_genres.iter().collect();
    vec![
        AdvisorContribution::new(
            "curator",
            format!("Balanced preferences from {} group members", group.member_count),
        ),
        AdvisorContribution::new(
            "technical",
            format!("Ensured pieces work for skill levels: {}", join_or_none(&skills)),
        ),
        AdvisorContribution::new(
            "flow",
            format!(
                "Created flow considering preferences for {}",
                join_or_none(&genres)
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{ConcertType, SkillLevel};
    use crate::preference::{PreferenceExtractor, PreferenceRecord};

    fn piece(title: &str, composer: &str, minutes: u32, genre: &str, style: &str) -> CandidatePiece {
        CandidatePiece::new(title, composer)
            .with_duration(minutes)
            .with_genre(genre)
            .with_style(style)
            .with_difficulty(SkillLevel::Intermediate)
    }

    fn pool() -> Vec<CandidatePiece> {
        vec![
            piece("Autumn Leaves", "Joseph Kosma", 4, "jazz", "ballad"),
            piece("Blue Monk", "Thelonious Monk", 4, "blues", "medium"),
            piece("Master of Puppets", "Metallica", 8, "metal", "up-tempo"),
            piece("Take Five", "Paul Desmond", 5, "jazz", "up-tempo"),
            piece("Body and Soul", "Johnny Green", 5, "jazz", "ballad"),
            piece("Iron Man", "Black Sabbath", 6, "heavy metal", "medium"),
        ]
    }

    fn group(texts: &[&str]) -> GroupPreferences {
        let records: Vec<PreferenceRecord> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| PreferenceExtractor::extract(&format!("u{i}"), &format!("P{i}"), t))
            .collect();
        GroupPreferences::from_records(&records)
    }

    #[test]
    fn test_vetoed_genres_never_selected() {
        let g = group(&["avoid metal", "avoid metal", "I love jazz"]);
        let req = Requirements::new(ConcertType::JazzConcert, 60);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);
        assert!(program.iter_pieces().all(|p| !p.genre.contains("metal")));
        assert_eq!(program.piece_count(), 4);
    }

    #[test]
    fn test_budget_is_ninety_percent() {
        let g = group(&["I love jazz"]);
        let req = Requirements::new(ConcertType::JazzConcert, 10);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);
        assert!(f64::from(program.total_duration_minutes) <= 9.0);
    }

    #[test]
    fn test_start_and_end_hints_take_outer_slots() {
        let g = group(&["start with blues, end with a ballad", "love jazz"]);
        let req = Requirements::new(ConcertType::JazzConcert, 30);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);

        let first = &program.pieces[0];
        assert_eq!(first.piece.title, "Blue Monk");
        assert_eq!(first.rule, SelectionRule::Opener);
        assert!(first.rationale.starts_with("Opens with blues as requested"));

        let last = program.pieces.last().unwrap();
        assert_eq!(last.rule, SelectionRule::Closer);
        assert_eq!(last.piece.style.as_deref(), Some("ballad"));
        assert!(f64::from(program.total_duration_minutes) <= 27.0);
    }

    #[test]
    fn test_hint_that_does_not_fit_falls_back_to_natural_order() {
        let g = group(&["start with up-tempo"]);
        let req = Requirements::new(ConcertType::JazzConcert, 5);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);
        assert_eq!(program.titles(), vec!["Autumn Leaves"]);
        assert_ne!(program.pieces[0].rule, SelectionRule::Opener);
    }

    #[test]
    fn test_nothing_fitting_yields_placeholder() {
        let g = group(&["I love jazz"]);
        let req = Requirements::new(ConcertType::JazzConcert, 3);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);
        assert!(program.is_placeholder());
        assert_eq!(program.piece_count(), 1);
    }

    #[test]
    fn test_common_preferences_rank_first() {
        let g = group(&["Monk please", "I adore Monk"]);
        let req = Requirements::new(ConcertType::JazzConcert, 60);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);
        assert_eq!(program.pieces[0].piece.title, "Blue Monk");
        assert_eq!(program.pieces[0].rule, SelectionRule::CommonPreference);
        assert!(program.pieces[0].rationale.contains("Group favorite composer"));
    }

    #[test]
    fn test_contributions_and_confidence() {
        let g = group(&["jazz", "jazz"]);
        let req = Requirements::new(ConcertType::JazzConcert, 60);
        let program = ProgramSynthesizer::collaborative_program(pool(), &g, &req);
        assert_eq!(program.title, "Collaborative Jazz Concert Setlist");
        assert_eq!(program.contributions.len(), 3);
        assert!((program.confidence - 0.6).abs() < 1e-9);
        assert!(program.design_rationale.starts_with("Designed for 2 group members"));
    }
}
