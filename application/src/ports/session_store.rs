//! Session store port
//!
//! Holds group collection sessions for the lifetime of the process (or of
//! whatever external store an adapter wraps).

use async_trait::async_trait;
use setlist_domain::{CollectionSession, SessionId};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared, individually locked session.
///
/// Every read-modify-write of a session happens under its own mutex, so
/// concurrent submissions to one session serialize while different
/// sessions never contend.
pub type SessionHandle = Arc<Mutex<CollectionSession>>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session and return its handle
    async fn insert(&self, session: CollectionSession) -> SessionHandle;

    /// Look up a session by id
    async fn get(&self, id: &SessionId) -> Option<SessionHandle>;

    /// Number of sessions currently held
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
