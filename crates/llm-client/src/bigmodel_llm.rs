//! BigModel (Zhipu AI) implementation of [`LlmClient`].
//!
//! The endpoint speaks the OpenAI chat completion shape, so the request is built by hand:
//! `{model, messages: [{role, content}], stream: false, temperature?}`. The reply is read
//! from `choices[0].message.content`; anything else is a malformed response.

use async_trait::async_trait;
use prompt::{ChatMessage, DEFAULT_SYSTEM_MESSAGE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::{assistant_reply, translate_messages, BackendConfig, BackendError, LlmClient};

/// Default BigModel API base URL.
pub const BIGMODEL_API_BASE: &str = "https://open.bigmodel.cn/api/paas/v4";

/// LlmClient for BigModel's OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct BigModelLlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    system_prompt: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl BigModelLlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: BIGMODEL_API_BASE.to_string(),
            model: "glm-4-flash".to_string(),
            temperature: None,
            system_prompt: None,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        let mut client = Self::new(config.api_key.clone())
            .with_base_url(config.base_url().to_string())
            .with_model(config.model.clone());
        client.temperature = config.temperature;
        client.system_prompt = config.system_prompt.clone();
        client
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn system_content(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }
}

#[async_trait]
impl LlmClient for BigModelLlmClient {
    fn name(&self) -> &str {
        "bigmodel"
    }

    #[instrument(skip(self, messages), fields(model = %self.model, message_count = messages.len()))]
    async fn invoke(&self, messages: Vec<ChatMessage>) -> Result<ChatMessage, BackendError> {
        let translated = translate_messages(&messages, self.system_content());
        let request = ChatRequest {
            model: &self.model,
            messages: translated
                .iter()
                .map(|m| WireMessage {
                    role: m.role().as_str(),
                    content: m.content(),
                })
                .collect(),
            stream: false,
            temperature: self.temperature,
        };

        info!(
            model = %self.model,
            message_count = request.messages.len(),
            api_key = %openai_client::mask_token(&self.api_key),
            "BigModel chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(BackendError::network)?;

        let status = response.status();
        let body = response.text().await.map_err(BackendError::network)?;
        if !status.is_success() {
            return Err(BackendError::Provider {
                status: Some(status.as_u16()),
                message: provider_message(&body),
            });
        }

        let text = extract_reply(&body)?;
        assistant_reply(text)
    }
}

/// Reads `choices[0].message.content`; an `error` object in a 2xx body counts as a provider error.
fn extract_reply(body: &str) -> Result<String, BackendError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BackendError::MalformedResponse(format!("response is not JSON: {}", e)))?;
    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        return Err(BackendError::Provider {
            status: None,
            message: error_message(error),
        });
    }
    value
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            BackendError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

fn provider_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").map(error_message))
        .unwrap_or_else(|| body.to_string())
}

fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}
