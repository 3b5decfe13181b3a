//! Design Program use case
//!
//! Runs the advisor council over a set of requirements:
//! Analyze → Propose → Cross-Evaluate → Synthesize. Each phase fans out one
//! task per advisor call and is a barrier for the next. Failed calls are
//! annotated and replaced by defaults, so a valid request always ends in a
//! [`Program`].

use crate::advisors::Advisor;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use futures::future::join_all;
use serde::Serialize;
use setlist_domain::core::string::truncate;
use setlist_domain::{
    AdvisorAnalysis, AdvisorContribution, AdvisorKind, CandidatePiece, DomainError, Evaluation,
    Phase, PhaseNote, Program, ProgramSynthesizer, Requirements,
};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors surfaced to the caller; advisor failures never are
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error(transparent)]
    InvalidRequirements(#[from] DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DesignError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DesignError::Cancelled)
    }
}

/// Outcome of a full council run
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub program: Program,
    /// Successful analyses, in seat order
    pub analyses: Vec<AdvisorAnalysis>,
    /// Degraded calls and fallbacks, in phase order
    pub notes: Vec<PhaseNote>,
    /// Distinct pieces that reached cross-evaluation
    pub candidates_considered: usize,
    /// Evaluations that returned a readable verdict
    pub evaluations_captured: usize,
}

impl DesignReport {
    pub fn is_degraded(&self) -> bool {
        !self.notes.is_empty() || self.program.is_placeholder()
    }
}

/// One advisor's suggestions, without cross-evaluation
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorSuggestions {
    pub advisor: AdvisorKind,
    pub analysis: Option<AdvisorAnalysis>,
    pub pieces: Vec<CandidatePiece>,
    /// `pieces` are the advisor's built-in picks because its proposal failed
    pub fallback: bool,
}

/// Use case for designing a program with the advisor council
pub struct DesignProgramUseCase {
    advisors: Vec<Arc<dyn Advisor>>,
    cancellation_token: Option<CancellationToken>,
}

impl DesignProgramUseCase {
    pub fn new(advisors: Vec<Arc<dyn Advisor>>) -> Self {
        Self {
            advisors,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn advisor_kinds(&self) -> Vec<AdvisorKind> {
        self.advisors.iter().map(|a| a.kind()).collect()
    }

    /// Design a program; only invalid input or cancellation is an error
    pub async fn design(&self, requirements: &Requirements) -> Result<Program, DesignError> {
        Ok(self.execute(requirements).await?.program)
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, requirements: &Requirements) -> Result<DesignReport, DesignError> {
        self.execute_with_progress(requirements, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        requirements: &Requirements,
        progress: &dyn ProgressNotifier,
    ) -> Result<DesignReport, DesignError> {
        requirements.validate()?;
        self.check_cancelled()?;

        if self.advisors.is_empty() {
            warn!("No advisors configured, the program will be a placeholder");
        }
        info!(
            "Starting council with {} advisors for a {}-minute {}",
            self.advisors.len(),
            requirements.target_duration_minutes,
            requirements.concert_type.display_name()
        );

        let mut notes = Vec::new();

        // Phase 1: Analysis
        let analyses = self
            .phase_analyze(requirements, progress, &mut notes)
            .await?;

        // Phase 2: Proposals
        let proposals = self
            .phase_propose(requirements, &analyses, progress, &mut notes)
            .await?;
        let candidates = dedupe_by_title(proposals);
        let candidates_considered = candidates.len();
        debug!("{} distinct candidates after deduplication", candidates_considered);

        // Phase 3: Cross-Evaluation
        let (candidates, confidences) = self
            .phase_evaluate(requirements, candidates, progress, &mut notes)
            .await?;

        // Phase 4: Synthesis
        let program =
            self.phase_synthesize(requirements, candidates, &confidences, &analyses, progress, &mut notes);

        info!(
            "Council finished: {} pieces, {} minutes, confidence {:.2}",
            program.piece_count(),
            program.total_duration_minutes,
            program.confidence
        );

        Ok(DesignReport {
            program,
            analyses,
            notes,
            candidates_considered,
            evaluations_captured: confidences.len(),
        })
    }

    /// Analyze and propose without cross-evaluation
    pub async fn suggest(
        &self,
        requirements: &Requirements,
    ) -> Result<Vec<AdvisorSuggestions>, DesignError> {
        requirements.validate()?;
        self.check_cancelled()?;

        let mut notes = Vec::new();
        let analyses = self
            .phase_analyze(requirements, &NoProgress, &mut notes)
            .await?;

        let calls = self.advisors.iter().map(|advisor| {
            let kind = advisor.kind();
            let own = analyses.iter().find(|a| a.advisor == kind);
            let peers = peer_analyses(&analyses, kind);
            async move {
                let (pieces, error) = advisor
                    .propose_or_fallback(requirements, own, &peers)
                    .await;
                AdvisorSuggestions {
                    advisor: kind,
                    analysis: own.cloned(),
                    pieces,
                    fallback: error.is_some(),
                }
            }
        });

        self.cancellable(join_all(calls)).await
    }

    /// Pass a program through every advisor's refinement, then reschedule it
    pub async fn refine(
        &self,
        program: &Program,
        requirements: &Requirements,
        feedback: &str,
    ) -> Result<Program, DesignError> {
        requirements.validate()?;
        info!("Refining '{}': {}", program.title, truncate(feedback, 60));

        let mut pieces: Vec<CandidatePiece> = program.iter_pieces().cloned().collect();
        for advisor in &self.advisors {
            pieces = self
                .cancellable(advisor.refine_or_identity(&pieces, requirements, feedback))
                .await?;
        }

        match ProgramSynthesizer::scored_program(
            pieces,
            requirements,
            program.contributions.clone(),
            program.confidence,
        ) {
            Ok(refined) => Ok(refined),
            Err(e) => {
                warn!("Refined pieces could not be scheduled, keeping the current program: {}", e);
                Ok(program.clone())
            }
        }
    }

    /// Phase 1: every advisor reads the requirements
    async fn phase_analyze(
        &self,
        requirements: &Requirements,
        progress: &dyn ProgressNotifier,
        notes: &mut Vec<PhaseNote>,
    ) -> Result<Vec<AdvisorAnalysis>, DesignError> {
        info!("Phase 1: Analysis");
        progress.on_phase_start(&Phase::Analyze, self.advisors.len());

        let mut join_set = JoinSet::new();
        for (seat, advisor) in self.advisors.iter().enumerate() {
            let advisor = Arc::clone(advisor);
            let requirements = requirements.clone();
            join_set.spawn(async move {
                let result = advisor.analyze(&requirements).await;
                (seat, advisor.kind(), result)
            });
        }

        let mut analyses = Vec::new();
        while let Some(joined) = self.cancellable(join_set.join_next()).await? {
            match joined {
                Ok((seat, kind, Ok(analysis))) => {
                    debug!("{} analysis ready", kind.name());
                    progress.on_task_complete(&Phase::Analyze, kind, true);
                    analyses.push((seat, analysis));
                }
                Ok((_, kind, Err(e))) => {
                    warn!("{} analysis failed: {}", kind.name(), e);
                    progress.on_task_complete(&Phase::Analyze, kind, false);
                    notes.push(PhaseNote::new(
                        Phase::Analyze,
                        Some(kind),
                        format!("analysis failed: {}", e),
                    ));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    notes.push(PhaseNote::new(Phase::Analyze, None, "an analysis task aborted"));
                }
            }
        }

        progress.on_phase_complete(&Phase::Analyze);
        Ok(in_seat_order(analyses))
    }

    /// Phase 2: every advisor proposes, seeing its own and its peers' analyses
    async fn phase_propose(
        &self,
        requirements: &Requirements,
        analyses: &[AdvisorAnalysis],
        progress: &dyn ProgressNotifier,
        notes: &mut Vec<PhaseNote>,
    ) -> Result<Vec<Vec<CandidatePiece>>, DesignError> {
        info!("Phase 2: Proposals");
        progress.on_phase_start(&Phase::Propose, self.advisors.len());

        let mut join_set = JoinSet::new();
        for (seat, advisor) in self.advisors.iter().enumerate() {
            let advisor = Arc::clone(advisor);
            let requirements = requirements.clone();
            let kind = advisor.kind();
            let own = analyses.iter().find(|a| a.advisor == kind).cloned();
            let peers = peer_analyses(analyses, kind);

            join_set.spawn(async move {
                let (pieces, error) = advisor
                    .propose_or_fallback(&requirements, own.as_ref(), &peers)
                    .await;
                (seat, kind, pieces, error)
            });
        }

        let mut proposals = Vec::new();
        while let Some(joined) = self.cancellable(join_set.join_next()).await? {
            match joined {
                Ok((seat, kind, pieces, None)) => {
                    info!("{} proposed {} pieces", kind.name(), pieces.len());
                    progress.on_task_complete(&Phase::Propose, kind, true);
                    proposals.push((seat, pieces));
                }
                Ok((seat, kind, pieces, Some(e))) => {
                    progress.on_task_complete(&Phase::Propose, kind, false);
                    notes.push(PhaseNote::new(
                        Phase::Propose,
                        Some(kind),
                        format!("proposal failed ({}), used {} built-in picks", e, pieces.len()),
                    ));
                    proposals.push((seat, pieces));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    notes.push(PhaseNote::new(Phase::Propose, None, "a proposal task aborted"));
                }
            }
        }

        progress.on_phase_complete(&Phase::Propose);
        Ok(in_seat_order(proposals))
    }

    /// Phase 3: every advisor scores every candidate
    async fn phase_evaluate(
        &self,
        requirements: &Requirements,
        mut candidates: Vec<CandidatePiece>,
        progress: &dyn ProgressNotifier,
        notes: &mut Vec<PhaseNote>,
    ) -> Result<(Vec<CandidatePiece>, Vec<f64>), DesignError> {
        info!("Phase 3: Cross-Evaluation");
        progress.on_phase_start(&Phase::Evaluate, self.advisors.len() * candidates.len());

        let shared = Arc::new(candidates.clone());
        let requirements = Arc::new(requirements.clone());
        let mut join_set = JoinSet::new();
        for advisor in &self.advisors {
            for index in 0..shared.len() {
                let advisor = Arc::clone(advisor);
                let pieces = Arc::clone(&shared);
                let requirements = Arc::clone(&requirements);
                join_set.spawn(async move {
                    let (evaluation, error) = advisor
                        .evaluate_or_default(&pieces[index], &requirements)
                        .await;
                    (index, advisor.kind(), evaluation, error)
                });
            }
        }

        let mut confidences = Vec::new();
        let mut failures: BTreeMap<AdvisorKind, usize> = BTreeMap::new();
        while let Some(joined) = self.cancellable(join_set.join_next()).await? {
            match joined {
                Ok((index, kind, evaluation, error)) => {
                    let piece = &mut candidates[index];
                    piece.record_score(kind.id(), evaluation.score);
                    match error {
                        None => confidences.push(evaluation.confidence),
                        Some(e) => {
                            debug!("{} could not evaluate '{}': {}", kind.name(), piece.title, e);
                            *failures.entry(kind).or_default() += 1;
                        }
                    }
                    progress.on_task_complete(&Phase::Evaluate, kind, true);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        for (kind, count) in failures {
            warn!(
                "{} failed {} of {} evaluations",
                kind.name(),
                count,
                candidates.len()
            );
            notes.push(PhaseNote::new(
                Phase::Evaluate,
                Some(kind),
                format!(
                    "{} of {} evaluations fell back to the default verdict",
                    count,
                    candidates.len()
                ),
            ));
        }

        progress.on_phase_complete(&Phase::Evaluate);
        Ok((candidates, confidences))
    }

    /// Phase 4: merge scores into a program, or fall back to the placeholder
    fn phase_synthesize(
        &self,
        requirements: &Requirements,
        candidates: Vec<CandidatePiece>,
        confidences: &[f64],
        analyses: &[AdvisorAnalysis],
        progress: &dyn ProgressNotifier,
        notes: &mut Vec<PhaseNote>,
    ) -> Program {
        info!("Phase 4: Synthesis");
        progress.on_phase_start(&Phase::Synthesize, 1);

        let confidence = mean(confidences).unwrap_or(Evaluation::FALLBACK_CONFIDENCE);
        let contributions = self.contributions(analyses, &candidates);

        let program = match ProgramSynthesizer::scored_program(
            candidates,
            requirements,
            contributions,
            confidence,
        ) {
            Ok(program) => program,
            Err(e) => {
                warn!("Synthesis failed, using placeholder program: {}", e);
                notes.push(PhaseNote::new(
                    Phase::Synthesize,
                    None,
                    format!("synthesis failed ({}), returned a placeholder", e),
                ));
                Program::placeholder(requirements.target_duration_minutes)
            }
        };

        progress.on_phase_complete(&Phase::Synthesize);
        program
    }

    fn contributions(
        &self,
        analyses: &[AdvisorAnalysis],
        candidates: &[CandidatePiece],
    ) -> Vec<AdvisorContribution> {
        self.advisors
            .iter()
            .map(|advisor| {
                let kind = advisor.kind();
                let scores: Vec<f64> = candidates
                    .iter()
                    .filter_map(|p| p.scores.get(kind.id()).copied())
                    .collect();
                let focus = analyses
                    .iter()
                    .find(|a| a.advisor == kind)
                    .map(|a| a.notes.clone())
                    .unwrap_or_else(|| kind.role().to_string());
                let summary = match mean(&scores) {
                    Some(avg) => format!(
                        "{}. Scored {} candidates, mean {:.1}/10",
                        focus,
                        scores.len(),
                        avg
                    ),
                    None => focus,
                };
                AdvisorContribution::new(kind.name(), summary)
            })
            .collect()
    }

    fn check_cancelled(&self) -> Result<(), DesignError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(DesignError::Cancelled);
        }
        Ok(())
    }

    /// Await `future` unless the token fires first
    async fn cancellable<F: Future>(&self, future: F) -> Result<F::Output, DesignError> {
        match &self.cancellation_token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(DesignError::Cancelled),
                output = future => Ok(output),
            },
            None => Ok(future.await),
        }
    }
}

fn peer_analyses(analyses: &[AdvisorAnalysis], kind: AdvisorKind) -> Vec<AdvisorAnalysis> {
    analyses
        .iter()
        .filter(|a| a.advisor != kind)
        .cloned()
        .collect()
}

fn in_seat_order<T>(mut items: Vec<(usize, T)>) -> Vec<T> {
    items.sort_by_key(|(seat, _)| *seat);
    items.into_iter().map(|(_, item)| item).collect()
}

/// Flatten proposals, keeping the first piece seen for each title
fn dedupe_by_title(proposals: Vec<Vec<CandidatePiece>>) -> Vec<CandidatePiece> {
    let mut kept: Vec<CandidatePiece> = Vec::new();
    for piece in proposals.into_iter().flatten() {
        if !kept.iter().any(|k| k.same_title(&piece.title)) {
            kept.push(piece);
        }
    }
    kept
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
