//! Process-local session store
//!
//! Sessions live until the process exits. The map lock is held only for
//! lookups and inserts; session mutation happens under each session's own
//! mutex.

use async_trait::async_trait;
use setlist_application::{SessionHandle, SessionStore};
use setlist_domain::{CollectionSession, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: CollectionSession) -> SessionHandle {
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        debug!(session_id = %id, "Session stored");
        handle
    }

    async fn get(&self, id: &SessionId) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
