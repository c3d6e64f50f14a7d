//! Transport boundary.

use async_trait::async_trait;

/// What a chat transport (webhook, polling loop, terminal) calls for each inbound event.
///
/// Implementations must not fail: every event produces the text to send back to the
/// participant, error replies included.
#[async_trait]
pub trait ConversationHandler: Send + Sync {
    /// Plain text message from `participant_id`.
    async fn on_text_message(&self, participant_id: &str, text: &str) -> String;

    /// `/start`-style command: greet without calling the model.
    async fn on_start_command(&self, participant_id: &str) -> String;
}
