//! Collection session state machine
//!
//! `Collecting -> Complete` once every required participant has a record,
//! `Collecting -> Failed` when synthesis fails. Terminal sessions are frozen.

use crate::core::error::DomainError;
use crate::music::{Program, Requirements};
use crate::preference::PreferenceRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Unique identifier for a collection session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Collecting,
    Complete,
    Failed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Collecting => "collecting",
            SessionStatus::Complete => "complete",
            SessionStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::Collecting)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where the group chat request came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOrigin {
    pub group_id: String,
    pub conversation_id: String,
    pub organizer_id: String,
    pub organizer_name: String,
}

/// A bounded collection of preference responses for one group request (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSession {
    id: SessionId,
    origin: SessionOrigin,
    requirements: Requirements,
    required: BTreeSet<String>,
    received: BTreeMap<String, PreferenceRecord>,
    status: SessionStatus,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    program: Option<Program>,
    compatibility: Option<f64>,
    failure: Option<String>,
}

impl CollectionSession {
    pub fn new(
        origin: SessionOrigin,
        requirements: Requirements,
        required: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            origin,
            requirements,
            required: required.into_iter().collect(),
            received: BTreeMap::new(),
            status: SessionStatus::Collecting,
            created_at: Utc::now(),
            finished_at: None,
            program: None,
            compatibility: None,
            failure: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn origin(&self) -> &SessionOrigin {
        &self.origin
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn compatibility(&self) -> Option<f64> {
        self.compatibility
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Records in participant-id order
    pub fn records(&self) -> impl Iterator<Item = &PreferenceRecord> {
        self.received.values()
    }

    pub fn received_count(&self) -> usize {
        self.received.len()
    }

    /// Required participants without a record yet
    pub fn remaining(&self) -> BTreeSet<String> {
        self.required
            .iter()
            .filter(|id| !self.received.contains_key(*id))
            .cloned()
            .collect()
    }

    /// True iff the received participant set equals the required set
    pub fn is_ready(&self) -> bool {
        self.received.len() == self.required.len()
            && self.received.keys().all(|id| self.required.contains(id))
    }

    /// Upsert a participant's record; resubmission replaces the earlier one
    pub fn record_response(&mut self, record: PreferenceRecord) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::SessionClosed(self.status.to_string()));
        }
        if !self.required.contains(&record.participant_id) {
            return Err(DomainError::ParticipantNotInvited(record.participant_id));
        }
        self.received.insert(record.participant_id.clone(), record);
        Ok(())
    }

    /// Attach the program and freeze the session
    pub fn complete(&mut self, program: Program, compatibility: f64) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::SessionClosed(self.status.to_string()));
        }
        if !self.is_ready() {
            return Err(DomainError::SessionIncomplete(self.remaining().len()));
        }
        self.program = Some(program);
        self.compatibility = Some(compatibility);
        self.status = SessionStatus::Complete;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::SessionClosed(self.status.to_string()));
        }
        self.failure = Some(reason.into());
        self.status = SessionStatus::Failed;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            status: self.status,
            received_count: self.received.len(),
            required_count: self.required.len(),
            remaining: self.remaining(),
            program: self.program.clone(),
            created_at: self.created_at,
            finished_at: self.finished_at,
        }
    }
}

/// Read-only view of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub received_count: usize,
    pub required_count: usize,
    pub remaining: BTreeSet<String>,
    pub program: Option<Program>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
