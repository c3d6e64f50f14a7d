//! Role translation shared by every provider.

use prompt::{ChatMessage, DEFAULT_SYSTEM_MESSAGE};
use tracing::warn;

/// System half of the pair substituted for a malformed message.
pub const FALLBACK_SYSTEM_CONTENT: &str = DEFAULT_SYSTEM_MESSAGE;
/// User half of the pair substituted for a malformed message.
pub const FALLBACK_USER_CONTENT: &str = "Hello";

fn fallback_pair() -> [ChatMessage; 2] {
    [
        ChatMessage::system(FALLBACK_SYSTEM_CONTENT),
        ChatMessage::user(FALLBACK_USER_CONTENT),
    ]
}

/// Maps the conversation onto the provider's `{role, content}` list.
///
/// - `system`, `user`, `assistant` map to themselves.
/// - A message with blank content is replaced by the fallback system/user pair
///   (logged as `MalformedHistoryWarning`); an empty input becomes that pair too.
/// - Without a leading system message, `default_instruction` is inserted at position 0.
/// - System messages after position 0 are dropped.
///
/// The result is never empty.
pub fn translate_messages(messages: &[ChatMessage], default_instruction: &str) -> Vec<ChatMessage> {
    let mut out: Vec<ChatMessage> = Vec::with_capacity(messages.len() + 1);
    if messages.is_empty() {
        warn!("MalformedHistoryWarning: empty message list, using fallback pair");
        out.extend(fallback_pair());
    }
    for (index, msg) in messages.iter().enumerate() {
        if msg.is_well_formed() {
            out.push(msg.clone());
        } else {
            warn!(
                index,
                role = %msg.role(),
                "MalformedHistoryWarning: blank message content, substituting fallback pair"
            );
            out.extend(fallback_pair());
        }
    }

    if !out.first().is_some_and(ChatMessage::is_system) {
        out.insert(0, ChatMessage::system(default_instruction));
    }
    let mut seen_system = false;
    out.retain(|m| {
        if !m.is_system() {
            return true;
        }
        let keep = !seen_system;
        seen_system = true;
        keep
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt::MessageRole;

    #[test]
    fn well_formed_sequence_passes_through() {
        let input = vec![
            ChatMessage::system("sys"),
            ChatMessage::user("q"),
            ChatMessage::assistant("a"),
            ChatMessage::user("q2"),
        ];
        assert_eq!(translate_messages(&input, "default"), input);
    }

    #[test]
    fn missing_system_gets_default_instruction() {
        let out = translate_messages(&[ChatMessage::user("q")], "be nice");
        assert_eq!(out, vec![ChatMessage::system("be nice"), ChatMessage::user("q")]);
    }

    #[test]
    fn empty_list_becomes_fallback_pair() {
        let out = translate_messages(&[], "ignored");
        assert_eq!(
            out,
            vec![
                ChatMessage::system(FALLBACK_SYSTEM_CONTENT),
                ChatMessage::user(FALLBACK_USER_CONTENT)
            ]
        );
    }

    #[test]
    fn lone_malformed_message_becomes_fallback_pair() {
        let out = translate_messages(&[ChatMessage::user("   ")], "ignored");
        assert_eq!(
            out,
            vec![
                ChatMessage::system(FALLBACK_SYSTEM_CONTENT),
                ChatMessage::user(FALLBACK_USER_CONTENT)
            ]
        );
    }

    #[test]
    fn malformed_message_mid_history_keeps_single_leading_system() {
        let input = vec![
            ChatMessage::system("sys"),
            ChatMessage::user("q"),
            ChatMessage::assistant(""),
            ChatMessage::user("q2"),
        ];
        let out = translate_messages(&input, "default");
        let contents: Vec<&str> = out.iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["sys", "q", FALLBACK_USER_CONTENT, "q2"]);
        assert_eq!(out.iter().filter(|m| m.is_system()).count(), 1);
    }

    #[test]
    fn translation_is_total() {
        let shapes: Vec<Vec<ChatMessage>> = vec![
            vec![],
            vec![ChatMessage::system("")],
            vec![ChatMessage::assistant("a")],
            vec![ChatMessage::system("a"), ChatMessage::system("b")],
            vec![ChatMessage::user("\n\t"), ChatMessage::assistant(" ")],
        ];
        for shape in shapes {
            let out = translate_messages(&shape, "default");
            assert!(!out.is_empty());
            assert_eq!(out[0].role(), MessageRole::System);
            assert!(out.iter().all(ChatMessage::is_well_formed));
            assert_eq!(out.iter().filter(|m| m.is_system()).count(), 1);
        }
    }
}
