//! Tests for the SerpAPI search gateway.

use first_agent::{SearchError, WebSearch};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_search_sends_expected_query_and_parses_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("engine", "google"))
        .and(query_param("q", "latest python release"))
        .and(query_param("api_key", "serp"))
        .and(query_param("num", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search_metadata": {"status": "Success"},
            "organic_results": [
                {"position": 1, "title": "Python.org", "link": "https://python.org", "snippet": "Download"},
                {"position": 2, "title": "Wikipedia", "link": "https://en.wikipedia.org/wiki/Python"},
                {"position": 3, "title": "Extra", "link": "https://extra.example"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = WebSearch::new().with_base_url(server.uri());
    let results = search.search("latest python release", "serp", 2).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Python.org");
    assert_eq!(results[0].snippet.as_deref(), Some("Download"));
    assert_eq!(results[1].link, "https://en.wikipedia.org/wiki/Python");
    assert!(results[1].snippet.is_none());
}

#[tokio::test]
async fn test_search_without_organic_results_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer_box": {}})))
        .mount(&server)
        .await;

    let search = WebSearch::new().with_base_url(server.uri());
    assert!(search.search("q", "k", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_success_status_embeds_truncated_body() {
    let server = MockServer::start().await;
    let body = format!("Invalid API key. {}", "z".repeat(400));
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string(body))
        .mount(&server)
        .await;

    let search = WebSearch::new().with_base_url(server.uri());
    let err = search.search("q", "bad", 5).await.unwrap_err();
    match &err {
        SearchError::RequestFailed { status, body } => {
            assert_eq!(*status, 401);
            assert_eq!(body.chars().count(), 200);
            assert!(body.starts_with("Invalid API key."));
        }
        other => panic!("expected RequestFailed, got {:?}", other),
    }
    assert!(err
        .to_string()
        .starts_with("SerpAPI request failed: HTTP 401 Invalid API key."));
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let search = WebSearch::new().with_base_url(server.uri());
    let err = search.search("q", "k", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_timeout_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"organic_results": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let search = WebSearch::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(50));
    let err = search.search("q", "k", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::Network(_)));
}
