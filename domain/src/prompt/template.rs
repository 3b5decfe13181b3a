//! Prompt templates for the advisor pipeline

use crate::advisor::{AdvisorAnalysis, AdvisorKind};
use crate::core::string::join_or_none;
use crate::music::{CandidatePiece, Requirements};

/// Templates for generating prompts at each advisor capability
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt shared by every call an advisor makes
    pub fn advisor_system(kind: AdvisorKind) -> String {
        let persona = match kind {
            AdvisorKind::Curator => {
                "You are an expert music curator with deep knowledge of concert repertoire.
You select pieces that suit the concert type, the performers and the audience."
            }
            AdvisorKind::Technical => {
                "You are a performance coach who judges technical feasibility.
You know what each skill level can play well and what each instrument demands."
            }
            AdvisorKind::Flow => {
                "You are a concert programmer who shapes the arc of a program.
You balance tempo, key, mood and energy from the opening piece to the finale."
            }
        };
        format!(
            "{}\nYou are the {} ({}). Answer only with the JSON requested, no commentary.",
            persona,
            kind.name(),
            kind.role()
        )
    }

    /// User prompt for the Propose phase
    pub fn propose_prompt(
        kind: AdvisorKind,
        requirements: &Requirements,
        own: Option<&AdvisorAnalysis>,
        peers: &[AdvisorAnalysis],
    ) -> String {
        let mut prompt = format!(
            r#"Suggest pieces for a {} of about {} minutes.

Requirements:
- Instruments: {}
- Skill level: {}
- Preferences: {}
- Already in repertoire (do not suggest): {}
"#,
            requirements.concert_type.display_name(),
            requirements.target_duration_minutes,
            requirements.instrument_list(),
            requirements.skill_ceiling,
            join_or_none(&requirements.preferences),
            join_or_none(&requirements.existing_repertoire),
        );

        if let Some(analysis) = own {
            prompt.push_str(&format!("\nYour analysis: {}\n", analysis.notes));
        }
        if !peers.is_empty() {
            prompt.push_str("\nOther advisors' analyses:\n");
            for peer in peers {
                prompt.push_str(&format!("- {}\n", peer.summary()));
            }
        }

        prompt.push_str(&format!(
            r#"
As the {}, suggest 5-8 pieces that work well together. Reply with a JSON array:
[{{"title": "...", "composer": "...", "duration_minutes": 5, "difficulty": "beginner|intermediate|advanced|professional",
  "key_signature": "...", "genre": "...", "style": "ballad|medium|up-tempo|...", "instruments": ["..."],
  "rationale": "why it fits"}}]"#,
            kind.name()
        ));
        prompt
    }

    /// User prompt for the Cross-Evaluate phase
    pub fn evaluate_prompt(
        kind: AdvisorKind,
        piece: &CandidatePiece,
        requirements: &Requirements,
    ) -> String {
        format!(
            r#"Evaluate this piece for a {} of about {} minutes.

Piece: {} by {}
Duration: {} minutes
Difficulty: {}
Genre: {}{}
Instruments: {}

Performers: {} level, playing {}

Judge it on {}.
Reply with JSON: {{"recommendation": "include|modify|exclude", "confidence": 0.0-1.0, "score": 0-10}}"#,
            requirements.concert_type.display_name(),
            requirements.target_duration_minutes,
            piece.title,
            piece.composer,
            piece.duration_minutes,
            piece.difficulty,
            piece.genre,
            piece
                .style
                .as_deref()
                .map(|s| format!(" ({})", s))
                .unwrap_or_default(),
            join_or_none(&piece.instruments),
            requirements.skill_ceiling,
            requirements.instrument_list(),
            kind.scoring_focus(),
        )
    }

    /// User prompt for refining a piece list against feedback
    pub fn refine_prompt(kind: AdvisorKind, pieces: &[CandidatePiece], feedback: &str) -> String {
        let mut prompt = String::from("Refine this concert program based on the feedback.\n\nCurrent pieces:\n");
        for piece in pieces {
            prompt.push_str(&format!(
                "- {} by {} ({} min, {}, {})\n",
                piece.title, piece.composer, piece.duration_minutes, piece.difficulty, piece.genre
            ));
        }
        prompt.push_str(&format!(
            r#"
Feedback: {}

As the {}, keep what works and replace what the feedback rules out.
Reply with the complete revised list as a JSON array in the same shape as a proposal."#,
            feedback,
            kind.name()
        ));
        prompt
    }
}
