//! Collect Preferences use case
//!
//! Drives a group session: the organizer opens it, every invited participant
//! answers in free text, and the last answer triggers collaborative
//! selection from the catalog. Each session is mutated only under its own
//! lock, so the completion check and the synthesis it triggers run exactly
//! once per session.

use crate::ports::catalog::{CatalogError, StaticCatalog};
use crate::ports::session_store::SessionStore;
use serde::{Deserialize, Serialize};
use setlist_domain::{
    CollectionSession, DomainError, GroupPreferences, PreferenceExtractor, Program,
    ProgramSynthesizer, RequirementsParser, SessionId, SessionOrigin, SessionSnapshot,
    SessionStatus, broadcast_message, completion_message, waiting_message,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the caller
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("A session needs at least one participant")]
    NoParticipants,

    #[error("Participant {0} was not invited to this session")]
    ParticipantNotInvited(String),

    #[error(transparent)]
    Domain(DomainError),
}

impl From<DomainError> for CollectError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ParticipantNotInvited(id) => CollectError::ParticipantNotInvited(id),
            other => CollectError::Domain(other),
        }
    }
}

/// Input for opening a group session
#[derive(Debug, Clone)]
pub struct StartSessionInput {
    /// Organizer's request, e.g. "a 45 minute jazz set for piano and bass"
    pub raw_text: String,
    pub group_id: String,
    pub conversation_id: String,
    pub organizer_id: String,
    pub organizer_name: String,
    pub participant_ids: Vec<String>,
}

impl StartSessionInput {
    pub fn new(raw_text: impl Into<String>, participant_ids: Vec<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            group_id: String::new(),
            conversation_id: String::new(),
            organizer_id: String::new(),
            organizer_name: "The organizer".to_string(),
            participant_ids,
        }
    }

    pub fn with_group(mut self, group_id: impl Into<String>, conversation_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self.conversation_id = conversation_id.into();
        self
    }

    pub fn with_organizer(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.organizer_id = id.into();
        self.organizer_name = name.into();
        self
    }
}

/// Result of opening a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedSession {
    pub session_id: SessionId,
    pub broadcast_message: String,
    pub required_participants: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Waiting,
    Complete,
    Error,
}

/// Result of one participant's submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    pub status: SubmitStatus,
    pub message: String,
    pub remaining_participants: Vec<String>,
    pub program: Option<Program>,
}

/// Use case for collecting group preferences
pub struct PreferenceCollector {
    store: Arc<dyn SessionStore>,
    catalog: Arc<dyn StaticCatalog>,
}

impl PreferenceCollector {
    pub fn new(store: Arc<dyn SessionStore>, catalog: Arc<dyn StaticCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Open a session and produce the message to broadcast to participants
    pub async fn start_session(&self, input: StartSessionInput) -> Result<StartedSession, CollectError> {
        let participants: Vec<String> = input
            .participant_ids
            .iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();
        if participants.is_empty() {
            return Err(CollectError::NoParticipants);
        }

        let requirements = RequirementsParser::parse(&input.raw_text);
        let broadcast = broadcast_message(&input.organizer_name, &requirements);
        let origin = SessionOrigin {
            group_id: input.group_id,
            conversation_id: input.conversation_id,
            organizer_id: input.organizer_id,
            organizer_name: input.organizer_name,
        };

        let session = CollectionSession::new(origin, requirements, participants);
        let session_id = session.id();
        let required_participants: Vec<String> = session.required().iter().cloned().collect();
        self.store.insert(session).await;

        info!(
            session_id = %session_id,
            participants = required_participants.len(),
            "Preference session opened"
        );

        Ok(StartedSession {
            session_id,
            broadcast_message: broadcast,
            required_participants,
        })
    }

    /// Record one participant's answer; the last answer completes the session
    pub async fn submit_response(
        &self,
        session_id: &SessionId,
        participant_id: &str,
        name: &str,
        raw_text: &str,
    ) -> Result<SubmitOutcome, CollectError> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or(CollectError::SessionNotFound(*session_id))?;

        let mut session = handle.lock().await;

        if session.status().is_terminal() {
            debug!(session_id = %session_id, "Submission to a finished session");
            return Ok(terminal_outcome(&session));
        }

        let record = PreferenceExtractor::extract(participant_id, name, raw_text);
        session.record_response(record)?;

        let remaining: Vec<String> = session.remaining().into_iter().collect();
        if !remaining.is_empty() {
            info!(
                session_id = %session_id,
                participant = participant_id,
                remaining = remaining.len(),
                "Response recorded"
            );
            return Ok(SubmitOutcome {
                status: SubmitStatus::Waiting,
                message: waiting_message(name, &remaining),
                remaining_participants: remaining,
                program: None,
            });
        }

        info!(session_id = %session_id, "All responses in, building collaborative program");
        match self.synthesize(&session) {
            Ok((program, compatibility)) => {
                session.complete(program.clone(), compatibility)?;
                info!(
                    session_id = %session_id,
                    pieces = program.piece_count(),
                    compatibility,
                    "Session complete"
                );
                Ok(SubmitOutcome {
                    status: SubmitStatus::Complete,
                    message: completion_message(&program, compatibility),
                    remaining_participants: Vec::new(),
                    program: Some(program),
                })
            }
            Err(e) => {
                warn!(session_id = %session_id, "Collaborative synthesis failed: {}", e);
                session.fail(e.to_string())?;
                Ok(terminal_outcome(&session))
            }
        }
    }

    /// Read-only view of a session
    pub async fn get_status(&self, session_id: &SessionId) -> Result<SessionSnapshot, CollectError> {
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or(CollectError::SessionNotFound(*session_id))?;
        let session = handle.lock().await;
        Ok(session.snapshot())
    }

    fn synthesize(&self, session: &CollectionSession) -> Result<(Program, f64), CatalogError> {
        let requirements = session.requirements();
        let pool = self.catalog.pieces(requirements.concert_type)?;
        let group = GroupPreferences::from_records(session.records());
        debug!(
            "Group of {}: common genres {:?}, vetoed genres {:?}",
            group.member_count, group.common_genres, group.avoid_genres
        );
        let program = ProgramSynthesizer::collaborative_program(pool, &group, requirements);
        Ok((program, group.compatibility))
    }
}

/// Stored result of a finished session, returned again on late submissions
fn terminal_outcome(session: &CollectionSession) -> SubmitOutcome {
    match (session.status(), session.program()) {
        (SessionStatus::Complete, Some(program)) => SubmitOutcome {
            status: SubmitStatus::Complete,
            message: completion_message(program, session.compatibility().unwrap_or_default()),
            remaining_participants: Vec::new(),
            program: Some(program.clone()),
        },
        _ => SubmitOutcome {
            status: SubmitStatus::Error,
            message: format!(
                "Sorry, the collaborative setlist could not be created: {}",
                session.failure().unwrap_or("unknown error")
            ),
            remaining_participants: Vec::new(),
            program: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::catalog::CatalogEntry;
    use crate::ports::session_store::SessionHandle;
    use async_trait::async_trait;
    use setlist_domain::{CandidatePiece, ConcertType, SkillLevel};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, RwLock};

    #[derive(Default)]
    struct TestStore {
        sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    }

    #[async_trait]
    impl SessionStore for TestStore {
        async fn insert(&self, session: CollectionSession) -> SessionHandle {
            let id = session.id();
            let handle = Arc::new(Mutex::new(session));
            self.sessions.write().await.insert(id, Arc::clone(&handle));
            handle
        }

        async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
            self.sessions.read().await.get(id).cloned()
        }

        async fn len(&self) -> usize {
            self.sessions.read().await.len()
        }
    }

    /// Catalog double that counts lookups
    struct TestCatalog {
        pieces: Vec<CandidatePiece>,
        lookups: AtomicUsize,
        broken: bool,
    }

    impl TestCatalog {
        fn new(pieces: Vec<CandidatePiece>) -> Self {
            Self {
                pieces,
                lookups: AtomicUsize::new(0),
                broken: false,
            }
        }

        fn broken() -> Self {
            Self {
                broken: true,
                ..Self::new(Vec::new())
            }
        }
    }

    impl StaticCatalog for TestCatalog {
        fn pieces(&self, concert_type: ConcertType) -> Result<Vec<CandidatePiece>, CatalogError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(CatalogError::Empty(concert_type));
            }
            Ok(self.pieces.clone())
        }

        fn instruments(&self) -> Vec<CatalogEntry> {
            Vec::new()
        }
    }

    fn catalog_piece(title: &str, composer: &str, genre: &str, minutes: u32) -> CandidatePiece {
        CandidatePiece::new(title, composer)
            .with_genre(genre)
            .with_duration(minutes)
            .with_difficulty(SkillLevel::Intermediate)
    }

    fn mixed_catalog() -> Vec<CandidatePiece> {
        vec![
            catalog_piece("Master of Puppets", "Metallica", "metal", 8),
            catalog_piece("Paranoid", "Black Sabbath", "heavy metal", 3),
            catalog_piece("Take Five", "Paul Desmond", "jazz", 5),
            catalog_piece("Blue Monk", "Thelonious Monk", "blues", 6),
            catalog_piece("So What", "Miles Davis", "jazz", 9),
            catalog_piece("Autumn Leaves", "Joseph Kosma", "jazz", 6),
        ]
    }

    fn collector(catalog: TestCatalog) -> (PreferenceCollector, Arc<TestStore>, Arc<TestCatalog>) {
        let store = Arc::new(TestStore::default());
        let catalog = Arc::new(catalog);
        let collector = PreferenceCollector::new(store.clone(), catalog.clone());
        (collector, store, catalog)
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    async fn open(collector: &PreferenceCollector, participants: &[&str]) -> StartedSession {
        collector
            .start_session(
                StartSessionInput::new("Let's plan a 40 minute jazz concert", ids(participants))
                    .with_group("g1", "c1")
                    .with_organizer("u0", "Olivia"),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_session_parses_request_and_broadcasts() {
        let (collector, store, _) = collector(TestCatalog::new(mixed_catalog()));
        let started = open(&collector, &["bob", "alice", "alice"]).await;

        assert_eq!(started.required_participants, ids(&["alice", "bob"]));
        assert!(started.broadcast_message.contains("Olivia"));
        assert!(started.broadcast_message.contains("40-minute"));
        assert_eq!(store.len().await, 1);

        let snapshot = collector.get_status(&started.session_id).await.unwrap();
        assert_eq!(snapshot.status, SessionStatus::Collecting);
        assert_eq!(snapshot.required_count, 2);
        assert_eq!(snapshot.received_count, 0);
    }

    #[tokio::test]
    async fn test_start_session_without_participants_fails() {
        let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
        let result = collector
            .start_session(StartSessionInput::new("jazz night", ids(&["  "])))
            .await;
        assert_eq!(result.unwrap_err(), CollectError::NoParticipants);
    }

    #[tokio::test]
    async fn test_unknown_session_is_reported() {
        let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
        let missing = SessionId::new();
        let err = collector
            .submit_response(&missing, "bob", "Bob", "jazz please")
            .await
            .unwrap_err();
        assert_eq!(err, CollectError::SessionNotFound(missing));
        assert!(collector.get_status(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_uninvited_participant_is_rejected() {
        let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
        let started = open(&collector, &["alice"]).await;
        let err = collector
            .submit_response(&started.session_id, "mallory", "Mallory", "metal!")
            .await
            .unwrap_err();
        assert_eq!(err, CollectError::ParticipantNotInvited("mallory".into()));
    }

    #[tokio::test]
    async fn test_vetoes_from_any_member_exclude_pieces() {
        let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
        let started = open(&collector, &["a", "b", "c"]).await;
        let id = started.session_id;

        let first = collector
            .submit_response(&id, "a", "Ann", "Please avoid metal, it's too loud")
            .await
            .unwrap();
        assert_eq!(first.status, SubmitStatus::Waiting);
        assert_eq!(first.remaining_participants, ids(&["b", "c"]));
        assert!(first.message.starts_with("Thanks Ann!"));

        collector
            .submit_response(&id, "b", "Ben", "avoid metal")
            .await
            .unwrap();
        let last = collector
            .submit_response(&id, "c", "Cat", "I love jazz")
            .await
            .unwrap();

        assert_eq!(last.status, SubmitStatus::Complete);
        let program = last.program.unwrap();
        assert!(program.piece_count() > 0);
        assert!(program.iter_pieces().all(|p| !p.genre.contains("metal")));
        assert!(last.message.contains("Group Compatibility"));
    }

    #[tokio::test]
    async fn test_resubmission_replaces_instead_of_counting_twice() {
        let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
        let started = open(&collector, &["a", "b"]).await;
        let id = started.session_id;

        collector.submit_response(&id, "a", "Ann", "jazz").await.unwrap();
        let again = collector
            .submit_response(&id, "a", "Ann", "actually blues")
            .await
            .unwrap();
        assert_eq!(again.status, SubmitStatus::Waiting);
        assert_eq!(again.remaining_participants, ids(&["b"]));

        let snapshot = collector.get_status(&id).await.unwrap();
        assert_eq!(snapshot.received_count, 1);
    }

    #[tokio::test]
    async fn test_completion_is_order_independent() {
        for order in [["a", "b", "c"], ["c", "a", "b"], ["b", "c", "a"]] {
            let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
            let id = open(&collector, &["a", "b", "c"]).await.session_id;

            let mut statuses = Vec::new();
            for participant in order {
                let outcome = collector
                    .submit_response(&id, participant, participant, "jazz")
                    .await
                    .unwrap();
                statuses.push(outcome.status);
            }
            assert_eq!(
                statuses,
                vec![SubmitStatus::Waiting, SubmitStatus::Waiting, SubmitStatus::Complete]
            );
        }
    }

    #[tokio::test]
    async fn test_opener_hint_takes_first_slot() {
        let (collector, _, _) = collector(TestCatalog::new(mixed_catalog()));
        let id = open(&collector, &["a"]).await.session_id;

        let outcome = collector
            .submit_response(&id, "a", "Ann", "start with blues, end with a ballad")
            .await
            .unwrap();
        let program = outcome.program.unwrap();
        assert_eq!(program.pieces[0].piece.title, "Blue Monk");
    }

    #[tokio::test]
    async fn test_finished_session_is_immutable_and_status_idempotent() {
        let (collector, _, catalog) = collector(TestCatalog::new(mixed_catalog()));
        let id = open(&collector, &["a"]).await.session_id;

        let done = collector.submit_response(&id, "a", "Ann", "jazz").await.unwrap();
        assert_eq!(done.status, SubmitStatus::Complete);

        let late = collector
            .submit_response(&id, "a", "Ann", "metal only")
            .await
            .unwrap();
        assert_eq!(late.status, SubmitStatus::Complete);
        assert_eq!(late.program, done.program);
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 1);

        let first = collector.get_status(&id).await.unwrap();
        let second = collector.get_status(&id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.status, SessionStatus::Complete);
        assert_eq!(first.program, done.program);
    }

    #[tokio::test]
    async fn test_catalog_failure_fails_the_session() {
        let (collector, _, _) = collector(TestCatalog::broken());
        let id = open(&collector, &["a"]).await.session_id;

        let outcome = collector.submit_response(&id, "a", "Ann", "jazz").await.unwrap();
        assert_eq!(outcome.status, SubmitStatus::Error);
        assert!(outcome.program.is_none());
        assert!(outcome.message.contains("could not be created"));

        let snapshot = collector.get_status(&id).await.unwrap();
        assert_eq!(snapshot.status, SessionStatus::Failed);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_final_submissions_synthesize_once() {
        let participants: Vec<String> = (0..12).map(|i| format!("p{}", i)).collect();
        let (collector, _, catalog) = collector(TestCatalog::new(mixed_catalog()));
        let collector = Arc::new(collector);
        let started = collector
            .start_session(StartSessionInput::new("jazz for an hour", participants.clone()))
            .await
            .unwrap();

        let mut tasks = Vec::new();
        for participant in participants {
            let collector = Arc::clone(&collector);
            let id = started.session_id;
            tasks.push(tokio::spawn(async move {
                collector
                    .submit_response(&id, &participant, &participant, "I like jazz")
                    .await
            }));
        }

        let mut completions = 0;
        for task in tasks {
            if task.await.unwrap().unwrap().status == SubmitStatus::Complete {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 1);
    }
}
