//! Tests for [`prompt::PromptAssembler`].
//!
//! External interactions: none (pure function tests).

use prompt::{ChatMessage, MessageRole, PromptAssembler, DEFAULT_SYSTEM_MESSAGE};

/// **Test: Empty history yields [system, user(input)].**
#[test]
fn build_with_empty_history() {
    let assembler = PromptAssembler::new("You are Testo.");
    let out = assembler.build(&[], "hello");
    assert_eq!(
        out,
        vec![ChatMessage::system("You are Testo."), ChatMessage::user("hello")]
    );
}

/// **Test: Prior history is kept oldest first between system and the new input.**
#[test]
fn build_keeps_history_order() {
    let assembler = PromptAssembler::new("sys");
    let history = vec![
        ChatMessage::user("one"),
        ChatMessage::assistant("two"),
        ChatMessage::user("three"),
        ChatMessage::assistant("four"),
    ];
    let out = assembler.build(&history, "five");
    let contents: Vec<&str> = out.iter().map(|m| m.content()).collect();
    assert_eq!(contents, vec!["sys", "one", "two", "three", "four", "five"]);
}

/// **Test: Stored system messages collapse into the assembler's instruction.**
///
/// **Expected:** exactly one system message, at position 0, with the assembler's text,
/// no matter how many system messages the history holds; assembling twice gives the same result.
#[test]
fn build_collapses_stored_system_messages() {
    let assembler = PromptAssembler::new("current instruction");
    let history = vec![
        ChatMessage::system("old instruction"),
        ChatMessage::user("q"),
        ChatMessage::system("stray instruction"),
        ChatMessage::assistant("a"),
    ];
    let first = assembler.build(&history, "next");
    let second = assembler.build(&history, "next");
    assert_eq!(first, second);

    let systems: Vec<&ChatMessage> = first.iter().filter(|m| m.is_system()).collect();
    assert_eq!(systems.len(), 1);
    assert_eq!(first[0].role(), MessageRole::System);
    assert_eq!(first[0].content(), "current instruction");
    assert_eq!(first.len(), 4);
}

/// **Test: The history slice is not modified.**
#[test]
fn build_does_not_touch_history() {
    let assembler = PromptAssembler::default();
    let history = vec![ChatMessage::user("q"), ChatMessage::assistant("a")];
    let before = history.clone();
    let _ = assembler.build(&history, "again");
    assert_eq!(history, before);
    assert_eq!(assembler.instruction(), DEFAULT_SYSTEM_MESSAGE);
}
