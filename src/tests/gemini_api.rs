//! HTTP-level tests for the Gemini provider, using wiremock.

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::provider::{GeminiClient, GroundedProvider, ProviderError};

fn grounded_response() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [
                    { "text": "CLASSIFICATION: Positive\n" },
                    { "text": "SCORE: 64\nSUMMARY: Upbeat coverage.\nKEY_POINTS:\n- adoption up" }
                ]
            },
            "finishReason": "STOP",
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://news.example.com/a", "title": "Article A" } },
                    { "web": { "title": "no uri here" } }
                ]
            }
        }]
    })
}

#[tokio::test]
async fn test_generate_grounded_happy_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(header("x-goog-api-key", "AIzaTestKey"))
        .and(body_partial_json(serde_json::json!({
            "tools": [{ "google_search": {} }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(grounded_response()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(Some("AIzaTestKey".to_string()), "gemini-2.5-flash")
        .with_base_url(server.uri());

    let reply = client.generate_grounded("analyze Bitcoin").await.unwrap();

    // Text parts are concatenated in order.
    assert!(reply.text.starts_with("CLASSIFICATION: Positive"));
    assert!(reply.text.contains("SCORE: 64"));

    // Citations come through as-is, incomplete entries included.
    assert_eq!(reply.citations.len(), 2);
    assert_eq!(
        reply.citations[0].uri.as_deref(),
        Some("https://news.example.com/a")
    );
    assert_eq!(reply.citations[1].uri, None);
}

#[tokio::test]
async fn test_generate_grounded_without_citations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Tech: AI Boom" }] }
            }]
        })))
        .mount(&server)
        .await;

    let client = GeminiClient::new(Some("AIzaTestKey".to_string()), "gemini-2.5-flash")
        .with_base_url(server.uri());

    let reply = client.generate_grounded("trending please").await.unwrap();
    assert_eq!(reply.text, "Tech: AI Boom");
    assert!(reply.citations.is_empty());
}

#[tokio::test]
async fn test_api_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(Some("AIzaTestKey".to_string()), "gemini-2.5-flash")
        .with_base_url(server.uri());

    let err = client.generate_grounded("x").await.unwrap_err();
    match err {
        ProviderError::ApiError { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidates_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(Some("AIzaTestKey".to_string()), "gemini-2.5-flash")
        .with_base_url(server.uri());

    let err = client.generate_grounded("x").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unconfigured_client_never_hits_the_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client =
        GeminiClient::new(None, "gemini-2.5-flash").with_base_url(server.uri());

    let err = client.generate_grounded("x").await.unwrap_err();
    assert!(matches!(err, ProviderError::NotConfigured(_)));
}
