//! Advisor backed by the text-completion port

use super::{Advisor, AdvisorError};
use crate::config::CouncilParams;
use crate::ports::text_completion::{CompletionError, TextCompletion};
use async_trait::async_trait;
use setlist_domain::{
    AdvisorAnalysis, AdvisorKind, CandidatePiece, Evaluation, PromptTemplate, Requirements,
    parse_evaluation, parse_piece_list,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// One council seat: analysis is computed locally, everything else asks the model.
pub struct LlmAdvisor {
    kind: AdvisorKind,
    completion: Arc<dyn TextCompletion>,
    call_timeout: Duration,
}

impl LlmAdvisor {
    pub fn new(kind: AdvisorKind, completion: Arc<dyn TextCompletion>, call_timeout: Duration) -> Self {
        Self {
            kind,
            completion,
            call_timeout,
        }
    }

    /// Seat every advisor named in `params`
    pub fn council(
        completion: Arc<dyn TextCompletion>,
        params: &CouncilParams,
    ) -> Vec<Arc<dyn Advisor>> {
        params
            .advisors
            .iter()
            .map(|kind| {
                Arc::new(Self::new(*kind, Arc::clone(&completion), params.call_timeout))
                    as Arc<dyn Advisor>
            })
            .collect()
    }

    async fn ask(&self, prompt: &str) -> Result<String, CompletionError> {
        let system = PromptTemplate::advisor_system(self.kind);
        debug!(
            "{} asking {} ({} chars)",
            self.kind.name(),
            self.completion.provider_name(),
            prompt.len()
        );
        match tokio::time::timeout(self.call_timeout, self.completion.complete(prompt, Some(&system)))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout),
        }
    }
}

#[async_trait]
impl Advisor for LlmAdvisor {
    fn kind(&self) -> AdvisorKind {
        self.kind
    }

    async fn analyze(&self, requirements: &Requirements) -> Result<AdvisorAnalysis, AdvisorError> {
        Ok(AdvisorAnalysis::analyze(self.kind, requirements))
    }

    async fn propose(
        &self,
        requirements: &Requirements,
        own: Option<&AdvisorAnalysis>,
        peers: &[AdvisorAnalysis],
    ) -> Result<Vec<CandidatePiece>, AdvisorError> {
        let prompt = PromptTemplate::propose_prompt(self.kind, requirements, own, peers);
        let reply = self.ask(&prompt).await?;
        let pieces = parse_piece_list(&reply, requirements);
        if pieces.is_empty() {
            return Err(AdvisorError::EmptyProposal);
        }
        Ok(pieces)
    }

    async fn evaluate(
        &self,
        piece: &CandidatePiece,
        requirements: &Requirements,
    ) -> Result<Evaluation, AdvisorError> {
        let prompt = PromptTemplate::evaluate_prompt(self.kind, piece, requirements);
        let reply = self.ask(&prompt).await?;
        parse_evaluation(&reply).ok_or(AdvisorError::UnreadableEvaluation)
    }

    async fn refine(
        &self,
        pieces: &[CandidatePiece],
        requirements: &Requirements,
        feedback: &str,
    ) -> Result<Vec<CandidatePiece>, AdvisorError> {
        let prompt = PromptTemplate::refine_prompt(self.kind, pieces, feedback);
        let reply = self.ask(&prompt).await?;
        let mut refined = parse_piece_list(&reply, requirements);
        if refined.is_empty() {
            return Err(AdvisorError::EmptyProposal);
        }

        // Kept pieces retain the scores they already earned
        for piece in &mut refined {
            if let Some(original) = pieces.iter().find(|p| p.same_title(&piece.title)) {
                piece.scores = original.scores.clone();
            }
        }
        Ok(refined)
    }
}
