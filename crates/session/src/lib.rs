//! # Session store
//!
//! In-memory conversation state keyed by participant.
//!
//! ## SessionStore
//!
//! Owns every [`Session`]. Each session sits behind its own `tokio::sync::Mutex`, so one
//! participant's turns run one at a time while different participants never wait on
//! each other. The participant map itself is a `RwLock<HashMap<..>>`, write-locked only
//! to insert a new participant.
//!
//! **Limitations**:
//! - Data is lost on restart
//! - Sessions are never evicted; only their history is bounded ([`HistoryLimit`])

mod limit;
mod store;

pub use limit::{estimate_tokens, HistoryLimit};
pub use store::{SessionGuard, SessionStore};

use prompt::ChatMessage;

/// Conversation history of one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    participant_id: String,
    history: Vec<ChatMessage>,
}

impl Session {
    /// Empty session.
    pub fn new(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            history: Vec::new(),
        }
    }

    /// Session whose history starts with one system message.
    pub fn seeded(participant_id: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            history: vec![ChatMessage::system(system)],
        }
    }

    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Appends in order. A system message is only kept at position 0 of an empty
    /// history; anywhere else it is dropped.
    pub(crate) fn extend(&mut self, messages: impl IntoIterator<Item = ChatMessage>) {
        for msg in messages {
            if msg.is_system() && !self.history.is_empty() {
                tracing::warn!(
                    participant_id = %self.participant_id,
                    "Dropping system message appended after position 0"
                );
                continue;
            }
            self.history.push(msg);
        }
    }

    pub(crate) fn history_mut(&mut self) -> &mut Vec<ChatMessage> {
        &mut self.history
    }
}
