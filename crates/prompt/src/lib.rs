//! # Prompt
//!
//! Message types shared by every layer, plus the pieces that turn a stored
//! conversation into the exact message list sent to a model.
//!
//! ## Contents
//!
//! - [`ChatMessage`] / [`MessageRole`]: one element of an OpenAI-style `messages` array.
//! - [`PromptTemplate`]: system slot + history placeholder + `{input}` slot.
//! - [`PromptAssembler`]: builds `[system] + history + [user input]` for one turn.
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to chat completion APIs (OpenAI, BigModel, ...).

mod assembler;
mod template;

pub use assembler::PromptAssembler;
pub use template::{PromptTemplate, TemplateSlot, INPUT_VARIABLE};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

impl MessageRole {
    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected message construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("{0} message content is empty")]
    EmptyContent(MessageRole),
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
///
/// Fields are private so a message cannot change after construction. The unchecked
/// constructors ([`ChatMessage::user`] etc.) accept any text; [`ChatMessage::try_new`]
/// rejects blank content. Blank messages that slip through are caught by the
/// backend's role translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: MessageRole,
    content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Builds a message, failing when `content` is empty or whitespace only.
    pub fn try_new(role: MessageRole, content: impl Into<String>) -> Result<Self, MessageError> {
        let msg = Self::new(role, content);
        if msg.is_well_formed() {
            Ok(msg)
        } else {
            Err(MessageError::EmptyContent(role))
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn role(&self) -> MessageRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn is_system(&self) -> bool {
        self.role == MessageRole::System
    }

    /// True when the content is not blank.
    pub fn is_well_formed(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Default system instruction when no custom system message is provided.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_rejects_blank_content() {
        assert_eq!(
            ChatMessage::try_new(MessageRole::User, "   "),
            Err(MessageError::EmptyContent(MessageRole::User))
        );
        assert!(ChatMessage::try_new(MessageRole::User, "hi").is_ok());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }

    #[test]
    fn role_display_matches_wire_name() {
        assert_eq!(MessageRole::System.to_string(), "system");
        assert_eq!(MessageRole::User.as_str(), "user");
    }
}
