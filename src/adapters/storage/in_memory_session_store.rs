//! In-Memory Session Store Adapter
//!
//! The only SessionStore backend: sessions are process-lifetime state with
//! no persistence. The registry itself takes a read-write lock only long
//! enough to clone a handle out, so work on one session never blocks
//! lookups of another.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::negotiation::Session;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// In-memory session registry.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> SessionHandle {
        let id = session.id().clone();
        let handle: SessionHandle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&handle));
        handle
    }

    async fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionStoreError::not_found(id.clone()))
    }

    async fn contains(&self, id: &SessionId) -> bool {
        self.sessions.read().await.contains_key(id)
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
