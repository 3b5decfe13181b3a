//! Serializable views for commands whose result spans several calls

use serde::Serialize;
use setlist_application::{CatalogEntry, StartedSession, SubmitOutcome};
use setlist_domain::SessionSnapshot;

/// Everything the `catalog` command prints
#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub concert_types: Vec<CatalogEntry>,
    pub skill_levels: Vec<CatalogEntry>,
    pub instruments: Vec<CatalogEntry>,
}

/// One participant's reply in a simulated session
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantReply {
    pub participant: String,
    pub outcome: SubmitOutcome,
}

/// A simulated group session from broadcast to final state
#[derive(Debug, Clone, Serialize)]
pub struct CollectTranscript {
    pub session: StartedSession,
    pub replies: Vec<ParticipantReply>,
    pub final_state: SessionSnapshot,
}
