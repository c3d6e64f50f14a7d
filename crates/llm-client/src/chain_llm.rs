//! Template-and-chain client: the conversation is re-rendered through a
//! [`PromptTemplate`] (system + history placeholder + `{input}`) before an inner
//! client sends it.

use std::sync::Arc;

use async_trait::async_trait;
use prompt::{ChatMessage, MessageRole, PromptTemplate};
use tracing::{debug, instrument};

use crate::{BackendError, LlmClient};

#[derive(Clone)]
pub struct ChainLlmClient {
    template: PromptTemplate,
    inner: Arc<dyn LlmClient>,
}

impl ChainLlmClient {
    pub fn new(template: PromptTemplate, inner: Arc<dyn LlmClient>) -> Self {
        Self { template, inner }
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Splits off the trailing user message as the template input.
    fn split_input(mut messages: Vec<ChatMessage>) -> (Vec<ChatMessage>, Option<ChatMessage>) {
        match messages.last() {
            Some(last) if last.role() == MessageRole::User => {
                let input = messages.pop();
                (messages, input)
            }
            _ => (messages, None),
        }
    }
}

#[async_trait]
impl LlmClient for ChainLlmClient {
    fn name(&self) -> &str {
        "openai-chain"
    }

    #[instrument(skip(self, messages), fields(inner = %self.inner.name(), message_count = messages.len()))]
    async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError> {
        let (history, input) = Self::split_input(messages);
        let rendered = self
            .template
            .render(&history, input.as_ref().map(ChatMessage::content));
        debug!(rendered_count = rendered.len(), "Chain prompt rendered");
        self.inner.invoke(rendered).await
    }
}
