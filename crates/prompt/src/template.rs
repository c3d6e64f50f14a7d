//! Chat prompt template: an ordered list of slots rendered into a message list.

use crate::ChatMessage;

/// Variable replaced by the current user input inside a [`TemplateSlot::User`] slot.
pub const INPUT_VARIABLE: &str = "{input}";

/// One slot of a [`PromptTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSlot {
    /// Fixed system instruction.
    System(String),
    /// Placeholder expanded to the prior conversation, oldest first, without system messages.
    History,
    /// User message; [`INPUT_VARIABLE`] is replaced by the current input.
    User(String),
}

/// Ordered slots rendered into the `messages` array of a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    slots: Vec<TemplateSlot>,
}

impl PromptTemplate {
    pub fn new(slots: Vec<TemplateSlot>) -> Self {
        Self { slots }
    }

    /// `system` + history placeholder + `{input}`.
    pub fn chat(system: impl Into<String>) -> Self {
        Self::new(vec![
            TemplateSlot::System(system.into()),
            TemplateSlot::History,
            TemplateSlot::User(INPUT_VARIABLE.to_string()),
        ])
    }

    pub fn slots(&self) -> &[TemplateSlot] {
        &self.slots
    }

    /// First system slot's text, if any.
    pub fn system_instruction(&self) -> Option<&str> {
        self.slots.iter().find_map(|slot| match slot {
            TemplateSlot::System(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Renders the template.
    ///
    /// System messages stored in `history` are never copied: the template's own
    /// system slot is the only source of instructions. User slots are skipped when
    /// `input` is `None`.
    pub fn render(&self, history: &[ChatMessage], input: Option<&str>) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(history.len() + self.slots.len());
        for slot in &self.slots {
            match slot {
                TemplateSlot::System(text) => messages.push(ChatMessage::system(text.clone())),
                TemplateSlot::History => {
                    messages.extend(history.iter().filter(|m| !m.is_system()).cloned())
                }
                TemplateSlot::User(pattern) => {
                    if let Some(input) = input {
                        messages.push(ChatMessage::user(pattern.replace(INPUT_VARIABLE, input)));
                    }
                }
            }
        }
        messages
    }
}
