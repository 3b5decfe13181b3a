//! Score-ranked selection for the advisor pipeline

use super::{ProgramSynthesizer, SynthesisError};
use crate::music::{
    AdvisorContribution, CandidatePiece, Program, ProgramPiece, Requirements, SelectionRule,
};
use std::cmp::Ordering;

/// Additive slack over the target duration
pub const DURATION_TOLERANCE_MINUTES: u32 = 5;
pub const MAX_PROGRAM_PIECES: usize = 8;

impl ProgramSynthesizer {
    /// Pick pieces by mean advisor score.
    ///
    /// Drops pieces above the skill ceiling or already in the repertoire,
    /// sorts by aggregate score (stable, so ties keep proposal order), then
    /// accepts greedily while the running total stays within
    /// `target + DURATION_TOLERANCE_MINUTES` and at most
    /// `MAX_PROGRAM_PIECES` are taken. Pieces that do not fit are skipped.
    pub fn select_scored(
        candidates: Vec<CandidatePiece>,
        requirements: &Requirements,
    ) -> Result<Vec<CandidatePiece>, SynthesisError> {
        if candidates.is_empty() {
            return Err(SynthesisError::NoCandidates);
        }

        let mut eligible: Vec<CandidatePiece> = candidates
            .into_iter()
            .filter(|p| p.difficulty <= requirements.skill_ceiling)
            .filter(|p| !requirements.excludes_title(&p.title))
            .collect();
        eligible.sort_by(|a, b| compare_scores(b, a));

        let limit = requirements
            .target_duration_minutes
            .saturating_add(DURATION_TOLERANCE_MINUTES);
        let mut total: u32 = 0;
        let mut selected = Vec::new();
        for piece in eligible {
            if selected.len() >= MAX_PROGRAM_PIECES {
                break;
            }
            if let Some(next) = total.checked_add(piece.duration_minutes)
                && next <= limit
            {
                total = next;
                selected.push(piece);
            }
        }

        if selected.is_empty() {
            return Err(SynthesisError::NothingFits(
                requirements.target_duration_minutes,
            ));
        }
        Ok(selected)
    }

    /// Move the first beginner/intermediate piece to the front, otherwise keep order
    pub fn order_with_opener(selected: Vec<CandidatePiece>) -> Vec<ProgramPiece> {
        let mut pieces = selected;
        let opener = pieces.iter().position(|p| p.difficulty.is_approachable());
        if let Some(idx) = opener {
            let piece = pieces.remove(idx);
            pieces.insert(0, piece);
        }

        pieces
            .into_iter()
            .enumerate()
            .map(|(i, piece)| {
                let rule = if i == 0 && opener.is_some() {
                    SelectionRule::Opener
                } else {
                    SelectionRule::Scored
                };
                let rationale = scored_rationale(&piece, rule);
                ProgramPiece {
                    piece,
                    rule,
                    rationale,
                }
            })
            .collect()
    }

    /// Full scored path: selection, opener ordering, title and rationale
    pub fn scored_program(
        candidates: Vec<CandidatePiece>,
        requirements: &Requirements,
        contributions: Vec<AdvisorContribution>,
        confidence: f64,
    ) -> Result<Program, SynthesisError> {
        let selected = Self::select_scored(candidates, requirements)?;
        let pieces = Self::order_with_opener(selected);
        let total = pieces
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.piece.duration_minutes));

        let title = match pieces.first() {
            Some(first) => format!(
                "{} Program featuring {}",
                requirements.concert_type.display_name(),
                first.piece.composer
            ),
            None => format!("{} Program", requirements.concert_type.display_name()),
        };
        let design_rationale = format!(
            "Designed for {} level performers; Duration: {} minutes; Instruments: {}; Features {} carefully selected pieces",
            requirements.skill_ceiling,
            total,
            requirements.instrument_list(),
            pieces.len()
        );

        Ok(Program {
            title,
            total_duration_minutes: total,
            pieces,
            design_rationale,
            contributions,
            confidence: confidence.clamp(0.0, 1.0),
        })
    }
}

fn compare_scores(a: &CandidatePiece, b: &CandidatePiece) -> Ordering {
    let a = a.aggregate_score().unwrap_or(0.0);
    let b = b.aggregate_score().unwrap_or(0.0);
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn scored_rationale(piece: &CandidatePiece, rule: SelectionRule) -> String {
    let mut parts = Vec::new();
    if rule == SelectionRule::Opener {
        parts.push(format!("Opens at an approachable {} level", piece.difficulty));
    }
    if let Some(score) = piece.aggregate_score() {
        parts.push(format!("Average advisor score {:.1}/10", score));
    }
    if !piece.rationale.is_empty() {
        parts.push(piece.rationale.clone());
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::{ConcertType, SkillLevel};

    fn piece(title: &str, minutes: u32, difficulty: SkillLevel, score: f64) -> CandidatePiece {
        let mut p = CandidatePiece::new(title, format!("{title} Composer"))
            .with_duration(minutes)
            .with_difficulty(difficulty);
        p.record_score("curator", score);
        p
    }

    fn req(minutes: u32, skill: SkillLevel) -> Requirements {
        Requirements::new(ConcertType::JazzConcert, minutes).with_skill(skill)
    }

    #[test]
    fn test_greedy_respects_tolerance_and_skips_non_fits() {
        let candidates = vec![
            piece("A", 20, SkillLevel::Beginner, 9.0),
            piece("B", 12, SkillLevel::Beginner, 8.0),
            piece("C", 4, SkillLevel::Beginner, 7.0),
        ];
        let selected = ProgramSynthesizer::select_scored(candidates, &req(25, SkillLevel::Beginner))
            .unwrap();
        let titles: Vec<_> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(selected.iter().map(|p| p.duration_minutes).sum::<u32>() <= 30);
    }

    #[test]
    fn test_at_most_eight_pieces() {
        let candidates: Vec<_> = (0..12)
            .map(|i| piece(&format!("P{i}"), 1, SkillLevel::Beginner, 5.0))
            .collect();
        let selected =
            ProgramSynthesizer::select_scored(candidates, &req(60, SkillLevel::Beginner)).unwrap();
        assert_eq!(selected.len(), MAX_PROGRAM_PIECES);
    }

    #[test]
    fn test_filters_difficulty_and_repertoire() {
        let candidates = vec![
            piece("Hard", 5, SkillLevel::Advanced, 10.0),
            piece("Known", 5, SkillLevel::Beginner, 9.0),
            piece("Fresh", 5, SkillLevel::Beginner, 1.0),
        ];
        let requirements = req(30, SkillLevel::Beginner)
            .with_existing_repertoire(vec!["known".into()]);
        let selected = ProgramSynthesizer::select_scored(candidates, &requirements).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].title, "Fresh");
    }

    #[test]
    fn test_nothing_fits_and_no_candidates() {
        assert_eq!(
            ProgramSynthesizer::select_scored(vec![], &req(30, SkillLevel::Beginner)),
            Err(SynthesisError::NoCandidates)
        );
        assert_eq!(
            ProgramSynthesizer::select_scored(
                vec![piece("Long", 40, SkillLevel::Beginner, 5.0)],
                &req(30, SkillLevel::Beginner)
            ),
            Err(SynthesisError::NothingFits(30))
        );
    }

    #[test]
    fn test_oversized_durations_do_not_overflow() {
        let reply = r#"[{"title": "Normal", "duration_minutes": 10},
            {"title": "Endless", "duration_minutes": 1e12}]"#;
        let parsed = crate::advisor::parse_piece_list(reply, &req(30, SkillLevel::Beginner));
        let selected =
            ProgramSynthesizer::select_scored(parsed, &req(30, SkillLevel::Beginner)).unwrap();
        assert_eq!(selected.len(), 2);

        let candidates = vec![
            piece("Short", 10, SkillLevel::Beginner, 9.0),
            piece("Huge", u32::MAX, SkillLevel::Beginner, 8.0),
        ];
        let selected =
            ProgramSynthesizer::select_scored(candidates, &req(u32::MAX, SkillLevel::Beginner))
                .unwrap();
        let titles: Vec<_> = selected.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Short"]);

        let program = ProgramSynthesizer::scored_program(
            vec![piece("Huge", u32::MAX, SkillLevel::Beginner, 8.0)],
            &req(u32::MAX, SkillLevel::Beginner),
            vec![],
            0.5,
        )
        .unwrap();
        assert_eq!(program.total_duration_minutes, u32::MAX);
    }

    #[test]
    fn test_opener_moves_first_approachable_piece() {
        let ordered = ProgramSynthesizer::order_with_opener(vec![
            piece("Adv", 5, SkillLevel::Advanced, 9.0),
            piece("Int", 5, SkillLevel::Intermediate, 8.0),
            piece("Beg", 5, SkillLevel::Beginner, 7.0),
        ]);
        let titles: Vec<_> = ordered.iter().map(|p| p.piece.title.as_str()).collect();
        assert_eq!(titles, vec!["Int", "Adv", "Beg"]);
        assert_eq!(ordered[0].rule, SelectionRule::Opener);
        assert_eq!(ordered[1].rule, SelectionRule::Scored);
    }

    #[test]
    fn test_opener_keeps_order_when_nothing_approachable() {
        let ordered = ProgramSynthesizer::order_with_opener(vec![
            piece("X", 5, SkillLevel::Advanced, 9.0),
            piece("Y", 5, SkillLevel::Professional, 8.0),
        ]);
        assert_eq!(ordered[0].piece.title, "X");
        assert!(ordered.iter().all(|p| p.rule == SelectionRule::Scored));
    }

    #[test]
    fn test_scored_program_title_and_rationale() {
        let requirements = req(30, SkillLevel::Intermediate).with_instruments(vec!["piano".into()]);
        let program = ProgramSynthesizer::scored_program(
            vec![
                piece("Blue Monk", 4, SkillLevel::Intermediate, 8.0),
                piece("Autumn Leaves", 4, SkillLevel::Intermediate, 6.0),
            ],
            &requirements,
            vec![],
            0.7,
        )
        .unwrap();
        assert_eq!(program.title, "Jazz Concert Program featuring Blue Monk Composer");
        assert_eq!(program.total_duration_minutes, 8);
        assert_eq!(
            program.design_rationale,
            "Designed for intermediate level performers; Duration: 8 minutes; Instruments: piano; Features 2 carefully selected pieces"
        );
        assert_eq!(program.confidence, 0.7);
    }
}
