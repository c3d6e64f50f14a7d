//! Tests for [`llm_client::BigModelLlmClient`] against a mockito server.
//!
//! Verifies the hand-built wire shape and the three failure modes.

use llm_client::{BackendConfig, BackendError, BigModelLlmClient, LlmClient, ProviderKind};
use mockito::Matcher;
use prompt::ChatMessage;
use serde_json::json;

fn client(server: &mockito::ServerGuard) -> BigModelLlmClient {
    let config = BackendConfig::new(ProviderKind::BigModel, "zp-test-key-123456".to_string())
        .with_base_url(server.url())
        .with_temperature(Some(0.7))
        .with_system_prompt("sys");
    BigModelLlmClient::from_config(&config)
}

/// **Test: Request is `{model, messages, stream:false, temperature}` with bearer auth.**
#[tokio::test]
async fn invoke_sends_wire_shape() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer zp-test-key-123456")
        .match_body(Matcher::Json(json!({
            "model": "glm-4-flash",
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "q" },
                { "role": "assistant", "content": "a" },
                { "role": "user", "content": "hello" }
            ],
            "stream": false,
            "temperature": 0.7
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hi there"}}]}"#)
        .create_async()
        .await;

    let reply = client(&server)
        .invoke(vec![
            ChatMessage::user("q"),
            ChatMessage::assistant("a"),
            ChatMessage::user("hello"),
        ])
        .await
        .unwrap();

    assert_eq!(reply, ChatMessage::assistant("hi there"));
    mock.assert_async().await;
}

/// **Test: Non-2xx carries status and the provider's error message.**
#[tokio::test]
async fn invoke_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body(r#"{"error":{"code":"500","message":"internal"}}"#)
        .create_async()
        .await;

    let err = client(&server)
        .invoke(vec![ChatMessage::user("hello")])
        .await
        .unwrap_err();
    match err {
        BackendError::Provider { status, message } => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "internal");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// **Test: 2xx body lacking choices[0].message.content is malformed.**
#[tokio::test]
async fn invoke_missing_content() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = client(&server)
        .invoke(vec![ChatMessage::user("hello")])
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::MalformedResponse(_)));
}

/// **Test: Empty input never reaches the provider as an empty list.**
#[tokio::test]
async fn invoke_empty_input_sends_fallback_pair() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "Hello" }
            ]
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"Hi!"}}]}"#)
        .create_async()
        .await;

    let reply = client(&server).invoke(vec![]).await.unwrap();
    assert_eq!(reply.content(), "Hi!");
    mock.assert_async().await;
}
