//! Backend configuration: provider selection, credential, endpoint, sampling.
//! Built once at startup (usually [`BackendConfig::from_env`]) and never reloaded.

use std::fmt;
use std::str::FromStr;

use dbot_core::env::{parse_or, require_any, var_any};
use dbot_core::ConfigError;
use prompt::DEFAULT_SYSTEM_MESSAGE;

use crate::bigmodel_llm::BIGMODEL_API_BASE;

/// Temperature used when `LLM_TEMPERATURE` is unset.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Which [`crate::LlmClient`] implementation serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Direct OpenAI chat completion.
    OpenAi,
    /// Template-and-chain call over the same OpenAI completion.
    OpenAiChain,
    /// BigModel (Zhipu AI) OpenAI-compatible endpoint.
    BigModel,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::OpenAiChain => "openai-chain",
            ProviderKind::BigModel => "bigmodel",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi | ProviderKind::OpenAiChain => openai_client::DEFAULT_API_BASE,
            ProviderKind::BigModel => BIGMODEL_API_BASE,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi | ProviderKind::OpenAiChain => "gpt-3.5-turbo",
            ProviderKind::BigModel => "glm-4-flash",
        }
    }

    fn api_key_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::OpenAi | ProviderKind::OpenAiChain => &["OPENAI_API_KEY"],
            ProviderKind::BigModel => &["BIGMODEL_API_KEY", "ZHIPUAI_API_KEY"],
        }
    }

    fn base_url_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi | ProviderKind::OpenAiChain => "OPENAI_BASE_URL",
            ProviderKind::BigModel => "BIGMODEL_BASE_URL",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "openai-chain" | "chain" => Ok(ProviderKind::OpenAiChain),
            "bigmodel" | "zhipuai" => Ok(ProviderKind::BigModel),
            other => Err(format!(
                "unknown provider {:?} (expected openai, openai-chain or bigmodel)",
                other
            )),
        }
    }
}

/// Backend settings shared by every provider.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// `None` means the provider's default endpoint.
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    /// Instruction injected when a request has no leading system message.
    pub system_prompt: Option<String>,
}

impl BackendConfig {
    /// Config with the provider's default model and endpoint.
    pub fn new(provider: ProviderKind, api_key: String) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            api_key,
            base_url: None,
            temperature: Some(DEFAULT_TEMPERATURE),
            system_prompt: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Load from environment variables.
    ///
    /// `LLM_PROVIDER` picks the provider (default `openai`); the credential variable
    /// depends on it. A missing credential is a [`ConfigError::Missing`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match var_any(&["LLM_PROVIDER"]) {
            None => ProviderKind::OpenAi,
            Some(raw) => raw
                .parse()
                .map_err(|reason: String| ConfigError::invalid("LLM_PROVIDER", &raw, reason))?,
        };
        let api_key = require_any(provider.api_key_vars())?;
        let base_url = var_any(&[provider.base_url_var()]);
        let model =
            var_any(&["MODEL"]).unwrap_or_else(|| provider.default_model().to_string());
        let temperature = parse_or("LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
        let system_prompt = var_any(&["LLM_SYSTEM_PROMPT", "SYSTEM_PROMPT"]);

        Ok(Self {
            provider,
            model,
            api_key,
            base_url,
            temperature: Some(temperature),
            system_prompt,
        })
    }

    /// Checks values `from_env` cannot: URL syntax and temperature range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.base_url {
            if let Err(e) = reqwest::Url::parse(url) {
                return Err(ConfigError::invalid(
                    self.provider.base_url_var(),
                    url,
                    e.to_string(),
                ));
            }
        }
        if let Some(t) = self.temperature {
            if !t.is_finite() || !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::invalid(
                    "LLM_TEMPERATURE",
                    &t.to_string(),
                    "must be between 0 and 2",
                ));
            }
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("MODEL", &self.model, "must not be empty"));
        }
        Ok(())
    }

    /// Configured endpoint or the provider default.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    /// Configured instruction or [`DEFAULT_SYSTEM_MESSAGE`].
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }
}
