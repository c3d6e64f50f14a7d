//! OpenAI implementation of [`LlmClient`]: wraps openai-client, translating roles first.

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CompletionError, CompletionParams, OpenAIClient, OpenAIError,
};
use prompt::{ChatMessage, MessageRole, DEFAULT_SYSTEM_MESSAGE};
use tracing::instrument;

use crate::{assistant_reply, translate_messages, BackendConfig, BackendError, LlmClient};

/// LlmClient backed by the OpenAI chat completion API.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: OpenAIClient,
    params: CompletionParams,
    system_prompt: Option<String>,
}

impl OpenAILlmClient {
    pub fn new(api_key: String) -> Self {
        Self::with_client(OpenAIClient::new(api_key))
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::with_client(OpenAIClient::with_base_url(api_key, base_url))
    }

    fn with_client(client: OpenAIClient) -> Self {
        Self {
            client,
            params: CompletionParams {
                model: "gpt-3.5-turbo".to_string(),
                temperature: None,
            },
            system_prompt: None,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::with_base_url(config.api_key.clone(), config.base_url().to_string())
            .with_model(config.model.clone())
            .with_temperature(config.temperature)
            .with_system_prompt_opt(config.system_prompt.clone())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.params.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.params.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    fn name(&self) -> &str {
        "openai"
    }

    #[instrument(skip(self, messages), fields(model = %self.params.model, message_count = messages.len()))]
    async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError> {
        let openai_messages = translate_messages(&messages, self.system_content())
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>, _>>()?;
        let text = self
            .client
            .chat_completion(&self.params, openai_messages)
            .await
            .map_err(backend_error)?;
        assistant_reply(text)
    }
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, BackendError> {
    let content = msg.content().to_string();
    let built: Result<ChatCompletionRequestMessage, OpenAIError> = match msg.role() {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
    };
    built.map_err(|e| BackendError::Request(e.to_string()))
}

fn backend_error(err: CompletionError) -> BackendError {
    match err {
        CompletionError::Api(OpenAIError::Reqwest(e)) => BackendError::network(e),
        CompletionError::Api(OpenAIError::ApiError(e)) => BackendError::Provider {
            status: None,
            message: e.message,
        },
        CompletionError::Api(OpenAIError::JSONDeserialize(e)) => {
            BackendError::MalformedResponse(e.to_string())
        }
        CompletionError::Api(other) => BackendError::Request(other.to_string()),
        missing @ (CompletionError::NoChoices | CompletionError::NoContent) => {
            BackendError::MalformedResponse(missing.to_string())
        }
    }
}
