//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for non-streamed chat completion.
//! Provides token masking for safe logging and a simple request/response API.
//!
//! The async-openai client retries rate-limited requests by default; this wrapper
//! turns that off so one call is exactly one HTTP attempt.

use std::sync::Arc;
use std::time::Duration;

use async_openai::{config::OpenAIConfig, types::CreateChatCompletionRequestArgs, Client};
use thiserror::Error;

pub use async_openai::error::OpenAIError;
pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Default OpenAI API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Why a chat completion produced no reply text.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport, API error payload, or undecodable body, as reported by async-openai.
    #[error(transparent)]
    Api(#[from] OpenAIError),

    #[error("No choices in OpenAI response")]
    NoChoices,

    #[error("First choice has no message content")]
    NoContent,
}

/// Parameters of one chat completion call besides the messages.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: Option<f32>,
}

/// OpenAI chat client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE.to_string())
    }

    /// Builds a client with a custom base URL (e.g. for proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        let no_retry = backoff::ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();
        let client = Client::with_config(config).with_backoff(no_retry);
        Self {
            client: Arc::new(client),
            api_key_for_logging: api_key,
        }
    }

    /// Sends a chat completion request (`stream: false`) and returns the first choice's content.
    ///
    /// Logs masked API key, request JSON, and token usage.
    pub async fn chat_completion(
        &self,
        params: &CompletionParams,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, CompletionError> {
        tracing::info!(
            model = %params.model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "OpenAI chat_completion request"
        );

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(params.model.as_str()).messages(messages).stream(false);
        if let Some(temperature) = params.temperature {
            args.temperature(temperature);
        }
        let request = args.build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "OpenAI chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI chat_completion usage"
            );
        }

        let choice = response.choices.first().ok_or(CompletionError::NoChoices)?;
        choice
            .message
            .content
            .clone()
            .ok_or(CompletionError::NoContent)
    }
}
