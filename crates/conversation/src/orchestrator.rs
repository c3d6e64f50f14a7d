use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::ConversationHandler;
use llm_client::{BackendError, LlmClient};
use prompt::{ChatMessage, MessageRole, PromptAssembler};
use session::SessionStore;
use tracing::{error, info, instrument};

use crate::{ConversationConfig, ConversationError, APOLOGY_MESSAGE};

/// Characters of the reply written to the log.
const REPLY_PREVIEW_CHARS: usize = 30;

/// Prompt sent by [`ConversationOrchestrator::check_backend`].
const PROBE_PROMPT: &str = "Say OK";

/// Coordinates [`SessionStore`], [`PromptAssembler`] and an [`LlmClient`] for each turn.
pub struct ConversationOrchestrator {
    store: SessionStore,
    assembler: PromptAssembler,
    llm: Arc<dyn LlmClient>,
    config: ConversationConfig,
}

impl ConversationOrchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, config: ConversationConfig) -> Self {
        let mut store = SessionStore::new().with_limit(config.history_limit);
        if config.seed_system {
            store = store.with_system_seed(config.system_prompt.clone());
        }
        Self {
            store,
            assembler: PromptAssembler::new(config.system_prompt.clone()),
            llm,
            config,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn config(&self) -> &ConversationConfig {
        &self.config
    }

    /// Runs one turn and returns the reply text.
    ///
    /// The participant's session stays locked for the whole turn, so turns of one
    /// participant never overlap. On error the session is left exactly as it was.
    #[instrument(skip(self, text), fields(provider = %self.llm.name()))]
    pub async fn try_handle(
        &self,
        participant_id: &str,
        text: &str,
    ) -> Result<String, ConversationError> {
        let user_message = ChatMessage::try_new(MessageRole::User, text)?;
        info!(participant_id = %participant_id, text_len = text.len(), "Received message");

        let mut session = self.store.lock(participant_id).await;
        let messages = self.assembler.build(session.history(), user_message.content());
        info!(
            history_len = session.history().len(),
            message_count = messages.len(),
            "Sending request to LLM"
        );

        let reply = self.invoke_backend(messages).await?;
        let reply_text = reply.content().to_string();
        info!(
            reply_preview = %preview(&reply_text),
            "Received LLM reply"
        );

        session.append([user_message, reply]);
        Ok(reply_text)
    }

    /// Like [`Self::try_handle`], but failures become the apology reply.
    pub async fn handle(&self, participant_id: &str, text: &str) -> String {
        match self.try_handle(participant_id, text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(participant_id = %participant_id, error = %e, "Error processing message");
                self.apology(&e)
            }
        }
    }

    /// Ensures a session exists and returns the greeting. Does not call the backend.
    pub async fn start(&self, participant_id: &str) -> String {
        let session = self.store.get_or_create(participant_id).await;
        info!(participant_id = %participant_id, history_len = session.len(), "Start command");
        self.config.greeting.clone()
    }

    /// Clears a participant's history. Returns false for an unknown participant.
    pub async fn reset(&self, participant_id: &str) -> bool {
        self.store.reset(participant_id).await
    }

    /// Reply text for a failed turn.
    pub fn apology(&self, err: &ConversationError) -> String {
        if self.config.reply_error_details {
            format!("{}\nError details: {}", APOLOGY_MESSAGE, err)
        } else {
            APOLOGY_MESSAGE.to_string()
        }
    }

    /// One-message round trip used at startup to fail fast on a bad key or endpoint.
    /// Touches no session.
    pub async fn check_backend(&self) -> Result<String, BackendError> {
        info!(provider = %self.llm.name(), "Checking LLM backend");
        let reply = self
            .invoke_backend(vec![ChatMessage::user(PROBE_PROMPT)])
            .await?;
        info!(reply_preview = %preview(reply.content()), "LLM backend reachable");
        Ok(reply.into_content())
    }

    async fn invoke_backend(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError> {
        match self.config.backend_timeout {
            Some(limit) => tokio::time::timeout(limit, self.llm.invoke(messages))
                .await
                .map_err(|_| BackendError::Timeout(limit))?,
            None => self.llm.invoke(messages).await,
        }
    }
}

#[async_trait]
impl ConversationHandler for ConversationOrchestrator {
    async fn on_text_message(&self, participant_id: &str, text: &str) -> String {
        self.handle(participant_id, text).await
    }

    async fn on_start_command(&self, participant_id: &str) -> String {
        self.start(participant_id).await
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(REPLY_PREVIEW_CHARS).collect();
    if text.chars().nth(REPLY_PREVIEW_CHARS).is_some() {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(40);
        assert_eq!(preview(&long), format!("{}...", "é".repeat(30)));
    }
}
