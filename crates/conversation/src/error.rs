use llm_client::BackendError;
use prompt::MessageError;
use thiserror::Error;

/// Fixed first line of every failure reply.
pub const APOLOGY_MESSAGE: &str = "Sorry, I encountered an error processing your message.";

/// Failure of a single turn. Never escapes to other participants.
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The user message could not be built (blank text).
    #[error("cannot build user message: {0}")]
    EmptyInput(#[from] MessageError),
}
