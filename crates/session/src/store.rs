use std::collections::HashMap;
use std::sync::Arc;

use prompt::ChatMessage;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info};

use crate::{HistoryLimit, Session};

/// Owns all sessions. Cheap lookups; one mutex per participant.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    seed_system: Option<String>,
    limit: HistoryLimit,
}

/// Exclusive access to one participant's session. Other callers for the same
/// participant wait (in arrival order) until the guard is dropped.
pub struct SessionGuard {
    guard: OwnedMutexGuard<Session>,
    limit: HistoryLimit,
}

impl SessionGuard {
    pub fn session(&self) -> &Session {
        &self.guard
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.guard.history()
    }

    /// Appends `messages` in order, then applies the store's [`HistoryLimit`].
    /// Returns how many old messages the limit removed.
    pub fn append(&mut self, messages: impl IntoIterator<Item = ChatMessage>) -> usize {
        self.guard.extend(messages);
        let removed = self.limit.truncate(self.guard.history_mut());
        if removed > 0 {
            debug!(
                participant_id = %self.guard.participant_id(),
                removed,
                remaining = self.guard.len(),
                "History truncated"
            );
        }
        removed
    }
}

impl SessionStore {
    /// Creates an empty store: unseeded sessions, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// New sessions start with `system` as their first message.
    pub fn with_system_seed(mut self, system: impl Into<String>) -> Self {
        self.seed_system = Some(system.into());
        self
    }

    pub fn with_limit(mut self, limit: HistoryLimit) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }

    fn new_session(&self, participant_id: &str) -> Session {
        match self.seed_system {
            Some(ref system) => Session::seeded(participant_id, system.clone()),
            None => Session::new(participant_id),
        }
    }

    async fn entry(&self, participant_id: &str) -> Arc<Mutex<Session>> {
        if let Some(entry) = self.sessions.read().await.get(participant_id) {
            return entry.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(participant_id.to_string())
            .or_insert_with(|| {
                info!(participant_id = %participant_id, "Creating session");
                Arc::new(Mutex::new(self.new_session(participant_id)))
            })
            .clone()
    }

    /// Returns a snapshot of the participant's session, creating it if needed. Never fails.
    pub async fn get_or_create(&self, participant_id: &str) -> Session {
        self.entry(participant_id).await.lock().await.clone()
    }

    /// Locks the participant's session (creating it if needed) for a read-modify-write.
    pub async fn lock(&self, participant_id: &str) -> SessionGuard {
        let guard = self.entry(participant_id).await.lock_owned().await;
        SessionGuard {
            guard,
            limit: self.limit,
        }
    }

    /// Appends messages to the participant's history in the given order.
    pub async fn append(
        &self,
        participant_id: &str,
        messages: impl IntoIterator<Item = ChatMessage>,
    ) {
        self.lock(participant_id).await.append(messages);
    }

    /// History snapshot, or `None` for a participant never seen.
    pub async fn history(&self, participant_id: &str) -> Option<Vec<ChatMessage>> {
        let entry = self.sessions.read().await.get(participant_id).cloned()?;
        let session = entry.lock().await;
        Some(session.history().to_vec())
    }

    /// Clears a participant's history back to a fresh session. Returns false when unknown.
    pub async fn reset(&self, participant_id: &str) -> bool {
        let Some(entry) = self.sessions.read().await.get(participant_id).cloned() else {
            return false;
        };
        *entry.lock().await = self.new_session(participant_id);
        info!(participant_id = %participant_id, "Session reset");
        true
    }

    pub async fn participant_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
