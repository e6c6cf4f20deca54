//! Tests for the LLM gateway and the HTTP providers, against wiremock.

use first_agent::provider::{MockProvider, ProviderError};
use first_agent::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_mock_mode_never_touches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let settings = Settings::new("cohere", "command-r").with_base_url(server.uri());
    assert!(settings.mock_mode());
    let llm = Llm::new(settings);

    let r = llm
        .complete("Hello", Some("sys"), CompletionOptions::default())
        .await
        .unwrap();
    assert!(r.used_mock);
    assert_eq!(r.model, "mock");
    assert!(r.text.to_lowercase().contains("mock"));
}

#[tokio::test]
async fn test_unknown_provider_errors_when_credentialed() {
    let llm = Llm::new(Settings::new("mystery", "m").with_api_key("k"));
    let err = llm
        .complete("Hello", None, CompletionOptions::default())
        .await
        .unwrap_err();
    match err {
        ProviderError::UnsupportedProvider(id) => assert_eq!(id, "mystery"),
        other => panic!("expected UnsupportedProvider, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cohere_request_and_response_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .and(header("authorization", "Bearer co-key"))
        .and(body_partial_json(json!({
            "model": "command-r-plus-08-2024",
            "messages": [
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "What is agentic AI?"}
            ],
            "max_tokens": 512
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "message": {
                "role": "assistant",
                "content": [{"type": "text", "text": "Agents act in loops."}]
            },
            "finish_reason": "COMPLETE"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings::new("cohere", "command-r-plus-08-2024")
        .with_api_key("co-key")
        .with_base_url(server.uri());
    let llm = Llm::new(settings);

    let r = llm
        .complete(
            "What is agentic AI?",
            Some("You are a helpful assistant."),
            CompletionOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(r.text, "Agents act in loops.");
    assert_eq!(r.model, "cohere:command-r-plus-08-2024");
    assert!(!r.used_mock);
}

#[tokio::test]
async fn test_openai_request_and_response_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4.1-mini",
            "messages": [{"role": "user", "content": "Hi"}],
            "max_tokens": 200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello!"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = Settings::new("openai", "gpt-4.1-mini")
        .with_api_key("sk-test")
        .with_base_url(server.uri());
    let llm = Llm::new(settings);

    let r = llm
        .complete("Hi", None, CompletionOptions::default().with_max_tokens(200))
        .await
        .unwrap();
    assert_eq!(r.text, "Hello!");
    assert_eq!(r.model, "openai:gpt-4.1-mini");
}

#[tokio::test]
async fn test_http_errors_map_to_provider_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/chat"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api token"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let cohere = Llm::new(
        Settings::new("cohere", "m")
            .with_api_key("bad")
            .with_base_url(server.uri()),
    );
    let err = cohere
        .complete("x", None, CompletionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Auth(ref m) if m == "invalid api token"));

    let openai = Llm::new(
        Settings::new("openai", "m")
            .with_api_key("k")
            .with_base_url(server.uri()),
    );
    let err = openai
        .complete("x", None, CompletionOptions::default())
        .await
        .unwrap_err();
    match err {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "overloaded");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_response_without_text_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let llm = Llm::new(
        Settings::new("openai", "m")
            .with_api_key("k")
            .with_base_url(server.uri()),
    );
    let err = llm
        .complete("x", None, CompletionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_scripted_gateway_passes_options_through() {
    let provider = MockProvider::text("ok");
    let llm = Llm::scripted(provider.clone());

    llm.complete(
        "prompt",
        Some("system"),
        CompletionOptions::default().with_temperature(0.0).with_max_tokens(42),
    )
    .await
    .unwrap();

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].prompt, "prompt");
    assert_eq!(requests[0].system_prompt.as_deref(), Some("system"));
    assert_eq!(requests[0].temperature, 0.0);
    assert_eq!(requests[0].max_tokens, 42);
}
