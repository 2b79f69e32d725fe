//! Single-shot chat and request-shaping integration tests

mod harness;

use std::sync::Arc;

use harness::mock::{MockProvider, MockResponse};
use jotter_config::Config;
use jotter_core::{ChatMessage, Provider};
use jotter_keys::KeyStore;
use jotter_llm::{ChatClient, ChatError};
use serde_json::json;
use tokio_util::sync::CancellationToken;

fn client_against(provider_name: &str, base_url: &str) -> ChatClient {
    let raw = format!("[providers.{provider_name}]\napi_key = \"test-key\"\nbase_url = \"{base_url}\"\n");
    let config = Config::from_toml(&raw).unwrap();
    let keys = Arc::new(KeyStore::from_config(&config));
    ChatClient::new(&config, keys)
}

fn completion_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama-3",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

#[tokio::test]
async fn complete_returns_first_choice_content() {
    let mock = MockProvider::start(MockResponse::Json(completion_response("Saved your note.")))
        .await
        .unwrap();
    let client = client_against("groq", &mock.base_url());

    let content = client
        .complete(
            Provider::Groq,
            "llama-3",
            &[ChatMessage::user("save this")],
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(content, "Saved your note.");

    let captured = mock.captured().unwrap();
    assert!(captured.body.get("stream").is_none());
    assert_eq!(captured.body["temperature"], json!(0.7));
}

#[tokio::test]
async fn openrouter_requests_carry_identity_headers() {
    let mock = MockProvider::start(MockResponse::Json(completion_response("ok")))
        .await
        .unwrap();
    let client = client_against("openrouter", &mock.base_url());

    client
        .complete(
            Provider::OpenRouter,
            "openrouter/auto",
            &[ChatMessage::user("hi")],
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let captured = mock.captured().unwrap();
    assert_eq!(
        captured.headers.get("http-referer").map(String::as_str),
        Some("https://jotter.app/")
    );
    assert_eq!(captured.headers.get("x-title").map(String::as_str), Some("Jotter"));
}

#[tokio::test]
async fn other_providers_do_not_carry_identity_headers() {
    let mock = MockProvider::start(MockResponse::Json(completion_response("ok")))
        .await
        .unwrap();
    let client = client_against("groq", &mock.base_url());

    client
        .complete(
            Provider::Groq,
            "llama-3",
            &[ChatMessage::user("hi")],
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let captured = mock.captured().unwrap();
    assert!(!captured.headers.contains_key("http-referer"));
    assert!(!captured.headers.contains_key("x-title"));
}

#[tokio::test]
async fn reasoning_model_body_omits_temperature_and_system_role() {
    let mock = MockProvider::start(MockResponse::Json(completion_response("ok")))
        .await
        .unwrap();
    let client = client_against("deepseek", &mock.base_url());

    client
        .complete(
            Provider::DeepSeek,
            "deepseek-reasoner",
            &[ChatMessage::user("hi")],
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let captured = mock.captured().unwrap();
    assert!(captured.body.get("temperature").is_none());

    let messages = captured.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "You are a helpful assistant.\n\nhi");
}

#[tokio::test]
async fn custom_system_instruction_becomes_leading_message() {
    let mock = MockProvider::start(MockResponse::Json(completion_response("ok")))
        .await
        .unwrap();
    let client = client_against("groq", &mock.base_url());

    client
        .complete(
            Provider::Groq,
            "llama-3",
            &[ChatMessage::user("hi")],
            Some("Answer in haiku."),
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    let captured = mock.captured().unwrap();
    let messages = captured.body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "Answer in haiku.");
}

#[tokio::test]
async fn api_error_reports_failure_to_key_store() {
    let mock = MockProvider::start(MockResponse::Error {
        status: 401,
        body: "invalid api key".to_owned(),
    })
    .await
    .unwrap();
    let client = client_against("openai", &mock.base_url());

    let error = client
        .complete(
            Provider::OpenAi,
            "gpt-4o-mini",
            &[ChatMessage::user("hi")],
            None,
            None,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, ChatError::Api { status: 401, .. }));
    let health = client.keys().health(Provider::OpenAi);
    assert!(!health.healthy);
    assert!(health.status.contains("invalid api key"));
    assert!(!health.status.contains("test-key"));
}
