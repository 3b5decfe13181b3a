//! Progress reporting for council runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use setlist_application::ProgressNotifier;
use setlist_domain::{AdvisorKind, Phase};
use std::sync::Mutex;

/// Reports progress during a council run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> String {
        format!("Phase {}: {}", Self::phase_number(phase), phase.display_name())
    }

    fn phase_number(phase: &Phase) -> usize {
        match phase {
            Phase::Analyze => 1,
            Phase::Propose => 2,
            Phase::Evaluate => 3,
            Phase::Synthesize => 4,
        }
    }

    fn task_label(advisor: AdvisorKind, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), advisor.name())
        } else {
            format!("{} {} (fallback)", "x".red(), advisor.name())
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, advisor: AdvisorKind, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::task_label(advisor, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            let done = format!("Phase {} complete!", Self::phase_number(phase));
            pb.finish_with_message(done.green().to_string());
        }
    }
}

/// Simple line-based progress on stderr, for runs that also print logs
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, advisor: AdvisorKind, success: bool) {
        eprintln!("  {}", ProgressReporter::task_label(advisor, success));
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names_are_numbered() {
        assert_eq!(
            ProgressReporter::phase_display_name(&Phase::Evaluate),
            "Phase 3: Cross-Evaluation"
        );
        assert_eq!(
            ProgressReporter::phase_display_name(&Phase::Synthesize),
            "Phase 4: Synthesis"
        );
    }

    #[test]
    fn test_reporter_tolerates_out_of_order_calls() {
        let reporter = ProgressReporter::new();
        // Completing without a started phase is a no-op
        reporter.on_task_complete(&Phase::Analyze, AdvisorKind::Flow, true);
        reporter.on_phase_complete(&Phase::Analyze);

        reporter.on_phase_start(&Phase::Propose, 2);
        reporter.on_task_complete(&Phase::Propose, AdvisorKind::Curator, true);
        reporter.on_task_complete(&Phase::Propose, AdvisorKind::Technical, false);
        reporter.on_phase_complete(&Phase::Propose);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
