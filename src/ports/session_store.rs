//! Session Store Port - Interface for the in-memory session registry.
//!
//! Sessions live for the process lifetime only; there is no persistence
//! and no eviction. The store's one concurrency promise: it hands out the
//! same [`SessionHandle`] for the same id, so callers that lock the handle
//! are serialized per session while distinct sessions proceed in parallel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::negotiation::Session;

/// Shared handle to one session.
///
/// A tokio mutex because holders keep the lock across model calls.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port for session registration and lookup.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a session and returns its handle.
    ///
    /// Ids are generated, so a collision cannot occur in practice; if one
    /// did, the newer session would replace the older.
    async fn insert(&self, session: Session) -> SessionHandle;

    /// Looks up the handle for an existing session.
    ///
    /// # Errors
    ///
    /// [`SessionStoreError::NotFound`] if the id is unknown.
    async fn get(&self, id: &SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Returns whether a session with this id exists.
    async fn contains(&self, id: &SessionId) -> bool;

    /// Returns the number of live sessions.
    async fn count(&self) -> usize;
}

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// No session registered under the given id.
    #[error("session not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: SessionId,
    },
}

impl SessionStoreError {
    /// Creates a not-found error.
    pub fn not_found(id: SessionId) -> Self {
        Self::NotFound { id }
    }
}
