//! Orchestrator settings, loaded from environment variables.

use std::time::Duration;

use dbot_core::env::{flag_or, parse_or, var_any};
use dbot_core::ConfigError;
use prompt::DEFAULT_SYSTEM_MESSAGE;
use session::HistoryLimit;

/// Reply to `/start` when `GREETING_MESSAGE` is unset.
pub const DEFAULT_GREETING: &str = "Hello! I am powered by GPT. Ask me anything!";

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationConfig {
    /// Process-wide system instruction used by the prompt assembler.
    pub system_prompt: String,
    pub greeting: String,
    /// Append the error description to apology replies.
    pub reply_error_details: bool,
    /// Seed new sessions with `system_prompt`.
    pub seed_system: bool,
    pub history_limit: HistoryLimit,
    /// `None` waits for the backend indefinitely.
    pub backend_timeout: Option<Duration>,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_MESSAGE.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            reply_error_details: true,
            seed_system: false,
            history_limit: HistoryLimit {
                max_messages: Some(40),
                max_tokens: Some(4096),
            },
            backend_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl ConversationConfig {
    /// Load from environment variables; unset values keep their defaults.
    /// A `0` for `HISTORY_MAX_*` or `LLM_TIMEOUT_SECS` disables that bound.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let system_prompt =
            var_any(&["LLM_SYSTEM_PROMPT", "SYSTEM_PROMPT"]).unwrap_or(defaults.system_prompt);
        let greeting = var_any(&["GREETING_MESSAGE"]).unwrap_or(defaults.greeting);
        let reply_error_details = flag_or("REPLY_ERROR_DETAILS", defaults.reply_error_details)?;
        let seed_system = flag_or("SESSION_SEED_SYSTEM", defaults.seed_system)?;
        let max_messages = parse_or("HISTORY_MAX_MESSAGES", 40usize)?;
        let max_tokens = parse_or("HISTORY_MAX_TOKENS", 4096usize)?;
        let timeout_secs = parse_or("LLM_TIMEOUT_SECS", 60u64)?;

        Ok(Self {
            system_prompt,
            greeting,
            reply_error_details,
            seed_system,
            history_limit: HistoryLimit {
                max_messages: Some(max_messages).filter(|&n| n > 0),
                max_tokens: Some(max_tokens).filter(|&n| n > 0),
            },
            backend_timeout: Some(timeout_secs)
                .filter(|&s| s > 0)
                .map(Duration::from_secs),
        })
    }
}
