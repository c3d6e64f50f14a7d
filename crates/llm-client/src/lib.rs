//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait and one implementation per [`ProviderKind`]:
//!
//! - [`OpenAILlmClient`]: direct chat completion through async-openai.
//! - [`ChainLlmClient`]: renders the conversation through a [`prompt::PromptTemplate`]
//!   before handing it to an inner client.
//! - [`BigModelLlmClient`]: OpenAI-compatible JSON over plain reqwest.
//!
//! Every implementation runs the same role translation ([`translate_messages`]) so the
//! provider never sees an empty or malformed message list. Clients hold no conversation
//! state; history always arrives through the call arguments.

use std::sync::Arc;

use async_trait::async_trait;
use prompt::{ChatMessage, PromptTemplate};

mod bigmodel_llm;
mod chain_llm;
mod config;
mod error;
mod openai_llm;
mod translate;

pub use bigmodel_llm::{BigModelLlmClient, BIGMODEL_API_BASE};
pub use chain_llm::ChainLlmClient;
pub use config::{BackendConfig, ProviderKind, DEFAULT_TEMPERATURE};
pub use error::BackendError;
pub use openai_llm::OpenAILlmClient;
pub use translate::{translate_messages, FALLBACK_SYSTEM_CONTENT, FALLBACK_USER_CONTENT};

/// LLM backend interface: one ordered message list in, one assistant message out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Requests a completion. The returned message always has role `assistant`.
    async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError>;
}

/// Builds the client selected by `config.provider`.
pub fn build_llm_client(config: &BackendConfig) -> Arc<dyn LlmClient> {
    match config.provider {
        ProviderKind::OpenAi => Arc::new(OpenAILlmClient::from_config(config)),
        ProviderKind::OpenAiChain => Arc::new(ChainLlmClient::new(
            PromptTemplate::chat(config.system_prompt()),
            Arc::new(OpenAILlmClient::from_config(config)),
        )),
        ProviderKind::BigModel => Arc::new(BigModelLlmClient::from_config(config)),
    }
}

/// Wraps provider reply text as the assistant message; blank text is a malformed response.
fn assistant_reply(text: String) -> Result<ChatMessage, BackendError> {
    if text.trim().is_empty() {
        return Err(BackendError::MalformedResponse(
            "reply content is empty".to_string(),
        ));
    }
    Ok(ChatMessage::assistant(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_llm_client_follows_provider_kind() {
        let openai = BackendConfig::new(ProviderKind::OpenAi, "sk-test".to_string());
        assert_eq!(build_llm_client(&openai).name(), "openai");

        let chain = BackendConfig::new(ProviderKind::OpenAiChain, "sk-test".to_string());
        assert_eq!(build_llm_client(&chain).name(), "openai-chain");

        let bigmodel = BackendConfig::new(ProviderKind::BigModel, "key".to_string());
        assert_eq!(build_llm_client(&bigmodel).name(), "bigmodel");
    }

    #[test]
    fn assistant_reply_rejects_blank_text() {
        assert!(matches!(
            assistant_reply("  ".to_string()),
            Err(BackendError::MalformedResponse(_))
        ));
        assert_eq!(
            assistant_reply("ok".to_string()).unwrap(),
            ChatMessage::assistant("ok")
        );
    }
}
