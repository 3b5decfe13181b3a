//! Console output formatter for council results

use colored::Colorize;
use serde::Serialize;
use setlist_application::{
    AdvisorSuggestions, CatalogEntry, DesignReport, StartedSession, SubmitOutcome, SubmitStatus,
};
use setlist_domain::{CandidatePiece, Program};

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete council report
    pub fn format(report: &DesignReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Setlist Council Results"));
        output.push('\n');

        // Phase 1: Analyses
        output.push_str(&Self::section_header("Phase 1: Analysis"));
        for analysis in &report.analyses {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", analysis.advisor.name()).yellow().bold(),
                analysis.notes
            ));
        }
        if report.analyses.is_empty() {
            output.push_str("\n(no analyses)\n");
        }

        // Phase 2/3 statistics
        output.push_str(&Self::section_header("Phase 2-3: Proposals and Cross-Evaluation"));
        output.push_str(&format!(
            "\n{} {}\n{} {}\n",
            "Candidates considered:".cyan(),
            report.candidates_considered,
            "Evaluations captured:".cyan(),
            report.evaluations_captured
        ));

        // Phase 4: Program
        output.push_str(&Self::section_header("Phase 4: Program"));
        output.push('\n');
        output.push_str(&Self::program_body(&report.program));

        if !report.program.contributions.is_empty() {
            output.push_str(&format!("\n{}\n", "Advisor Contributions:".cyan().bold()));
            for contribution in &report.program.contributions {
                output.push_str(&format!(
                    "  * {}: {}\n",
                    contribution.advisor.bold(),
                    contribution.summary
                ));
            }
        }

        if !report.notes.is_empty() {
            output.push_str(&format!("\n{}\n", "Degraded Calls:".yellow().bold()));
            for note in &report.notes {
                output.push_str(&format!("  * {}\n", note));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the program only (concise output)
    pub fn format_program(program: &Program) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", "=== Concert Program ===".cyan().bold()));
        output.push_str(&Self::program_body(program));
        output
    }

    /// Format each advisor's suggestions
    pub fn format_suggestions(suggestions: &[AdvisorSuggestions]) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Advisor Suggestions"));
        output.push('\n');

        for suggestion in suggestions {
            let mut title = format!("── {} ──", suggestion.advisor.name());
            if suggestion.fallback {
                title.push_str(" (built-in picks)");
            }
            output.push_str(&format!("\n{}\n", title.yellow().bold()));
            if let Some(analysis) = &suggestion.analysis {
                output.push_str(&format!("{}\n", analysis.notes.dimmed()));
            }
            for (i, piece) in suggestion.pieces.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, Self::piece_line(piece)));
                if !piece.rationale.is_empty() {
                    output.push_str(&format!("     {}\n", piece.rationale.dimmed()));
                }
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the organizer broadcast of a new session
    pub fn format_started(started: &StartedSession) -> String {
        format!(
            "{} {}\n{} {}\n\n{}\n",
            "Session:".cyan().bold(),
            started.session_id,
            "Waiting for:".cyan().bold(),
            started.required_participants.join(", "),
            started.broadcast_message
        )
    }

    /// Format the reply to one participant's submission
    pub fn format_outcome(participant: &str, outcome: &SubmitOutcome) -> String {
        let marker = match outcome.status {
            SubmitStatus::Waiting => "..".yellow(),
            SubmitStatus::Complete => "v".green(),
            SubmitStatus::Error => "x".red(),
        };
        format!(
            "{} {}\n{}\n",
            marker,
            format!("Reply to {}", participant).bold(),
            Self::indent(&outcome.message, "  ")
        )
    }

    /// Format the catalog listings
    pub fn format_catalog(
        concert_types: &[CatalogEntry],
        skill_levels: &[CatalogEntry],
        instruments: &[CatalogEntry],
    ) -> String {
        let mut output = String::new();
        for (title, entries) in [
            ("Concert Types", concert_types),
            ("Skill Levels", skill_levels),
            ("Instruments", instruments),
        ] {
            output.push_str(&Self::section_header(title));
            for entry in entries {
                output.push_str(&format!(
                    "  {:<20} {}\n",
                    entry.id.bold(),
                    entry.description
                ));
            }
        }
        output
    }

    fn program_body(program: &Program) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", program.title.bold()));
        output.push_str(&format!(
            "{} {} minutes, {} pieces, confidence {:.0}%\n\n",
            "Duration:".dimmed(),
            program.total_duration_minutes,
            program.piece_count(),
            program.confidence * 100.0
        ));

        for (i, slot) in program.pieces.iter().enumerate() {
            output.push_str(&format!(
                "  {:>2}. {} {}\n",
                i + 1,
                Self::piece_line(&slot.piece),
                format!("[{}]", slot.rule).dimmed()
            ));
            if !slot.rationale.is_empty() {
                output.push_str(&format!("      {}\n", slot.rationale.dimmed()));
            }
        }

        if !program.design_rationale.is_empty() {
            output.push_str(&format!(
                "\n{}\n{}\n",
                "Rationale:".cyan().bold(),
                Self::indent(&program.design_rationale, "  ")
            ));
        }
        output
    }

    fn piece_line(piece: &CandidatePiece) -> String {
        format!(
            "{} - {} ({} min, {}, {})",
            piece.title.bold(),
            piece.composer,
            piece.duration_minutes,
            piece.key_signature,
            piece.difficulty.as_str()
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_domain::{ProgramPiece, SelectionRule};

    fn program() -> Program {
        let mut program = Program::placeholder(20);
        program.title = "Jazz Concert Program".into();
        program.pieces = vec![ProgramPiece {
            piece: CandidatePiece::new("Blue Monk", "Thelonious Monk").with_duration(4),
            rule: SelectionRule::Opener,
            rationale: "Opens with the blues".into(),
        }];
        program.total_duration_minutes = 4;
        program.confidence = 0.75;
        program
    }

    #[test]
    fn test_program_lists_pieces_in_order() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_program(&program());
        assert!(text.contains("Jazz Concert Program"));
        assert!(text.contains(" 1. Blue Monk - Thelonious Monk (4 min"));
        assert!(text.contains("[opener]"));
        assert!(text.contains("confidence 75%"));
    }

    #[test]
    fn test_json_is_parseable() {
        let json = ConsoleFormatter::format_json(&program());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pieces"][0]["piece"]["title"], "Blue Monk");
    }

    #[test]
    fn test_catalog_sections() {
        colored::control::set_override(false);
        let entry = CatalogEntry::new("piano", "Piano", "Keyboard instrument");
        let text = ConsoleFormatter::format_catalog(&[], &[], &[entry]);
        assert!(text.contains("Instruments"));
        assert!(text.contains("piano"));
        assert!(text.contains("Keyboard instrument"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
