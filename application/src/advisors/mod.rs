//! Advisor capability
//!
//! Every advisor answers the same four questions about a program; the
//! variants only differ in the data an [`AdvisorKind`] selects. Failures are
//! ordinary `Err` values, and the `*_or_*` helpers map them onto the
//! documented defaults.

mod llm;

pub use llm::LlmAdvisor;

use crate::ports::text_completion::CompletionError;
use async_trait::async_trait;
use setlist_domain::{AdvisorAnalysis, AdvisorKind, CandidatePiece, Evaluation, Requirements};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisorError {
    #[error("Completion failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Reply contained no usable pieces")]
    EmptyProposal,

    #[error("Reply contained no readable verdict")]
    UnreadableEvaluation,

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait Advisor: Send + Sync {
    fn kind(&self) -> AdvisorKind;

    /// Read the requirements and derive constraints
    async fn analyze(&self, requirements: &Requirements) -> Result<AdvisorAnalysis, AdvisorError>;

    /// Suggest candidate pieces, informed by this and the other advisors' analyses
    async fn propose(
        &self,
        requirements: &Requirements,
        own: Option<&AdvisorAnalysis>,
        peers: &[AdvisorAnalysis],
    ) -> Result<Vec<CandidatePiece>, AdvisorError>;

    /// Judge one candidate
    async fn evaluate(
        &self,
        piece: &CandidatePiece,
        requirements: &Requirements,
    ) -> Result<Evaluation, AdvisorError>;

    /// Rework a piece list against feedback
    async fn refine(
        &self,
        pieces: &[CandidatePiece],
        requirements: &Requirements,
        feedback: &str,
    ) -> Result<Vec<CandidatePiece>, AdvisorError>;

    /// [`Advisor::propose`], falling back to the advisor's built-in picks
    async fn propose_or_fallback(
        &self,
        requirements: &Requirements,
        own: Option<&AdvisorAnalysis>,
        peers: &[AdvisorAnalysis],
    ) -> (Vec<CandidatePiece>, Option<AdvisorError>) {
        match self.propose(requirements, own, peers).await {
            Ok(pieces) => (pieces, None),
            Err(e) => {
                warn!("{} proposal failed, using fallback picks: {}", self.kind().name(), e);
                (self.kind().fallback_pieces(requirements), Some(e))
            }
        }
    }

    /// [`Advisor::evaluate`], falling back to [`Evaluation::fallback`]
    async fn evaluate_or_default(
        &self,
        piece: &CandidatePiece,
        requirements: &Requirements,
    ) -> (Evaluation, Option<AdvisorError>) {
        match self.evaluate(piece, requirements).await {
            Ok(evaluation) => (evaluation, None),
            Err(e) => (Evaluation::fallback(), Some(e)),
        }
    }

    /// [`Advisor::refine`], returning the input unchanged on failure
    async fn refine_or_identity(
        &self,
        pieces: &[CandidatePiece],
        requirements: &Requirements,
        feedback: &str,
    ) -> Vec<CandidatePiece> {
        match self.refine(pieces, requirements, feedback).await {
            Ok(refined) => refined,
            Err(e) => {
                warn!("{} refinement failed, keeping pieces: {}", self.kind().name(), e);
                pieces.to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setlist_domain::{ConcertType, Recommendation, SkillLevel};

    struct BrokenAdvisor;

    #[async_trait]
    impl Advisor for BrokenAdvisor {
        fn kind(&self) -> AdvisorKind {
            AdvisorKind::Technical
        }

        async fn analyze(&self, _: &Requirements) -> Result<AdvisorAnalysis, AdvisorError> {
            Err(AdvisorError::Other("broken".into()))
        }

        async fn propose(
            &self,
            _: &Requirements,
            _: Option<&AdvisorAnalysis>,
            _: &[AdvisorAnalysis],
        ) -> Result<Vec<CandidatePiece>, AdvisorError> {
            Err(CompletionError::Timeout.into())
        }

        async fn evaluate(
            &self,
            _: &CandidatePiece,
            _: &Requirements,
        ) -> Result<Evaluation, AdvisorError> {
            Err(CompletionError::RateLimited.into())
        }

        async fn refine(
            &self,
            _: &[CandidatePiece],
            _: &Requirements,
            _: &str,
        ) -> Result<Vec<CandidatePiece>, AdvisorError> {
            Err(AdvisorError::EmptyProposal)
        }
    }

    fn requirements() -> Requirements {
        Requirements::new(ConcertType::JazzConcert, 30).with_skill(SkillLevel::Beginner)
    }

    #[tokio::test]
    async fn test_failed_proposal_uses_fallback_picks() {
        let req = requirements();
        let (pieces, error) = BrokenAdvisor.propose_or_fallback(&req, None, &[]).await;
        assert!(!pieces.is_empty());
        assert!(pieces.iter().all(|p| p.difficulty <= SkillLevel::Beginner));
        assert_eq!(error, Some(AdvisorError::Completion(CompletionError::Timeout)));
    }

    #[tokio::test]
    async fn test_failed_evaluation_uses_default_verdict() {
        let piece = CandidatePiece::new("Blue Bossa", "Kenny Dorham");
        let (evaluation, error) = BrokenAdvisor.evaluate_or_default(&piece, &requirements()).await;
        assert_eq!(evaluation.recommendation, Recommendation::Include);
        assert_eq!(evaluation.confidence, 0.5);
        assert_eq!(evaluation.score, 5.0);
        assert!(error.is_some());
    }

    #[tokio::test]
    async fn test_failed_refinement_is_identity() {
        let pieces = vec![
            CandidatePiece::new("So What", "Miles Davis"),
            CandidatePiece::new("Take Five", "Paul Desmond"),
        ];
        let refined = BrokenAdvisor
            .refine_or_identity(&pieces, &requirements(), "more energy")
            .await;
        assert_eq!(refined, pieces);
    }
}
