//! Group chat messages for a collection session

use crate::core::string::join_or_none;
use crate::music::{Program, Requirements};

/// Questions sent to every participant when a session starts
pub struct PreferenceQuestions;

impl PreferenceQuestions {
    pub fn general() -> &'static [&'static str] {
        &[
            "What are your favorite genres? (jazz, classical, blues, etc.)",
            "Who are your favorite composers/artists?",
            "What instruments do you play?",
            "What's your skill level? (beginner/intermediate/advanced)",
            "Any genres you'd prefer to avoid?",
            "Do you prefer faster or slower tempo pieces?",
            "What mood are you going for? (energetic, relaxed, dramatic, etc.)",
        ]
    }

    pub fn concert_specific() -> &'static [&'static str] {
        &[
            "What's your ideal opening piece style?",
            "Do you want any solo features or ensemble pieces?",
            "Any specific pieces you've always wanted to perform?",
            "What would make this concert memorable for you?",
        ]
    }

    pub fn collaboration() -> &'static [&'static str] {
        &[
            "What do you think would work well for the whole group?",
            "Are you open to trying new genres or styles?",
            "Any pieces you think would be fun to perform together?",
        ]
    }
}

pub fn broadcast_message(organizer_name: &str, requirements: &Requirements) -> String {
    let concert = requirements.concert_type.display_name();
    let mut message = format!(
        "Collaborative {concert} Setlist Request\n\n\
         Hey everyone! {organizer_name} wants to create a {minutes}-minute {concert} setlist for our group.\n\n\
         To make this work for everyone, please reply with your answers to these questions:\n",
        minutes = requirements.target_duration_minutes,
    );

    for (heading, questions) in [
        ("Your Musical Preferences", PreferenceQuestions::general()),
        ("For This Concert", PreferenceQuestions::concert_specific()),
        ("Collaboration", PreferenceQuestions::collaboration()),
    ] {
        message.push_str(&format!("\n{heading}:\n"));
        for question in questions {
            message.push_str(&format!("- {question}\n"));
        }
    }

    message.push_str("\nOnce everyone responds, I'll create a setlist that balances all our preferences!");
    message
}

pub fn waiting_message<S: AsRef<str>>(responder_name: &str, remaining: &[S]) -> String {
    format!(
        "Thanks {}! Still waiting for responses from: {}",
        responder_name,
        join_or_none(remaining)
    )
}

pub fn completion_message(program: &Program, compatibility: f64) -> String {
    let mut message = format!(
        "Collaborative Setlist Complete!\n\n\
         Setlist Overview:\n\
         - Total Duration: {} minutes\n\
         - Pieces: {} selections\n\
         - Group Compatibility: {:.1}/1.0\n\n\
         The Program:\n",
        program.total_duration_minutes,
        program.piece_count(),
        compatibility,
    );

    for (i, slot) in program.pieces.iter().enumerate() {
        message.push_str(&format!(
            "{}. {} - {} ({} min)\n",
            i + 1,
            slot.piece.title,
            slot.piece.composer,
            slot.piece.duration_minutes
        ));
        if !slot.rationale.is_empty() {
            message.push_str(&format!("   {}\n", slot.rationale));
        }
    }

    message.push_str(&format!(
        "\nDesign Reasoning:\n{}\n\nThis setlist considers everyone's preferences and skill levels. Ready to rehearse!",
        program.design_rationale
    ));
    message
}
