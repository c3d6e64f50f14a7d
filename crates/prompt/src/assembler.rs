//! Per-turn prompt assembly.

use crate::{ChatMessage, PromptTemplate, DEFAULT_SYSTEM_MESSAGE};

/// Builds the message list for one turn: `[system] + history + [user input]`.
///
/// The assembler's instruction replaces any system message stored in the
/// history, so the output always carries exactly one, at position 0.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    template: PromptTemplate,
}

impl PromptAssembler {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            template: PromptTemplate::chat(system_instruction),
        }
    }

    pub fn instruction(&self) -> &str {
        self.template
            .system_instruction()
            .unwrap_or(DEFAULT_SYSTEM_MESSAGE)
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Pure: `history` is only read.
    pub fn build(&self, history: &[ChatMessage], input: &str) -> Vec<ChatMessage> {
        self.template.render(history, Some(input))
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_SYSTEM_MESSAGE)
    }
}
