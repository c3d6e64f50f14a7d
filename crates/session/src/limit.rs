//! History bound and truncation.

use prompt::{ChatMessage, MessageRole};

/// Estimates the token count for a text string.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4).max(1)
}

/// Upper bound on what a session retains. `None` disables a bound.
///
/// Only non-system messages count toward either bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryLimit {
    pub max_messages: Option<usize>,
    pub max_tokens: Option<usize>,
}

impl HistoryLimit {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn messages(max: usize) -> Self {
        Self {
            max_messages: Some(max),
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = Some(max);
        self
    }

    fn exceeded(&self, history: &[ChatMessage]) -> bool {
        let turns = history.iter().filter(|m| !m.is_system());
        let count = turns.clone().count();
        if self.max_messages.is_some_and(|max| count > max) {
            return true;
        }
        self.max_tokens
            .is_some_and(|max| turns.map(|m| estimate_tokens(m.content())).sum::<usize>() > max)
    }

    /// Drops the oldest non-system messages until the history fits.
    ///
    /// An assistant message left at the head of the conversation is dropped with the
    /// user message it answered. The leading system message and the newest message are
    /// always kept. Returns how many messages were removed.
    pub fn truncate(&self, history: &mut Vec<ChatMessage>) -> usize {
        let start = usize::from(history.first().is_some_and(ChatMessage::is_system));
        let mut removed = 0;
        while self.exceeded(history) && history.len() > start + 1 {
            history.remove(start);
            removed += 1;
            while history.len() > start + 1 && history[start].role() == MessageRole::Assistant {
                history.remove(start);
                removed += 1;
            }
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<ChatMessage> {
        (0..n)
            .flat_map(|i| {
                [
                    ChatMessage::user(format!("q{}", i)),
                    ChatMessage::assistant(format!("a{}", i)),
                ]
            })
            .collect()
    }

    #[test]
    fn test_estimate_tokens_coverage() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("Hello world"), 3);
        assert_eq!(estimate_tokens("abcdefgh"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(4097)), 1025);
    }

    #[test]
    fn unbounded_never_truncates() {
        let mut history = turns(100);
        assert_eq!(HistoryLimit::unbounded().truncate(&mut history), 0);
        assert_eq!(history.len(), 200);
    }

    #[test]
    fn message_bound_drops_oldest_turns() {
        let mut history = turns(5);
        let removed = HistoryLimit::messages(4).truncate(&mut history);
        assert_eq!(removed, 6);
        let contents: Vec<&str> = history.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["q3", "a3", "q4", "a4"]);
    }

    #[test]
    fn odd_bound_does_not_leave_orphan_assistant_at_head() {
        let mut history = turns(3);
        HistoryLimit::messages(3).truncate(&mut history);
        assert_eq!(history[0].role(), MessageRole::User);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn leading_system_message_is_kept() {
        let mut history = vec![ChatMessage::system("sys")];
        history.extend(turns(3));
        HistoryLimit::messages(2).truncate(&mut history);
        let contents: Vec<&str> = history.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["sys", "q2", "a2"]);
    }

    #[test]
    fn token_bound_keeps_newest_message() {
        let mut history = vec![
            ChatMessage::user("short"),
            ChatMessage::assistant("x".repeat(400)),
        ];
        HistoryLimit::default().with_max_tokens(10).truncate(&mut history);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content().len(), 400);
    }
}
