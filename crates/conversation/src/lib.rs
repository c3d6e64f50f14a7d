//! # Conversation
//!
//! [`ConversationOrchestrator`] is what a transport calls with `(participant, text)`.
//! One turn: lock the participant's session, assemble the prompt, call the backend,
//! and only on success append the user message and the reply. A failed turn leaves
//! the session untouched and becomes an apology reply.

mod config;
mod error;
mod orchestrator;

pub use config::{ConversationConfig, DEFAULT_GREETING};
pub use error::{ConversationError, APOLOGY_MESSAGE};
pub use orchestrator::ConversationOrchestrator;
