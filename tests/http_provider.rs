//! Integration tests for the HTTP generation backend against a local mock.

use earnings_insight::provider::http::{HttpGenerationProvider, HttpProviderConfig};
use earnings_insight::{Error, GenerationProvider};
use futures::StreamExt;

fn provider_for(server: &mockito::ServerGuard) -> HttpGenerationProvider {
    HttpGenerationProvider::new(
        HttpProviderConfig::new(server.url(), "test-model").with_api_key("test-key"),
    )
    .expect("valid config")
}

#[tokio::test]
async fn single_shot_extracts_message_content() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"content":"Ticker - Apple Inc."}}]}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    assert!(provider.is_available());

    let mut session = provider.create_session().await.unwrap();
    let text = session.complete_prompt("analyze AAPL").await.unwrap();
    assert_eq!(text, "Ticker - Apple Inc.");
    mock.assert_async().await;
}

#[tokio::test]
async fn streaming_yields_chunks_in_order() {
    let mut server = mockito::Server::new_async().await;
    let body = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Tic\"},\"index\":0}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"ker\"},\"index\":0}]}\n\n",
        "data: [DONE]\n\n",
    );
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(body)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let mut session = provider.create_session().await.unwrap();
    let chunks: Vec<String> = session
        .stream_prompt("analyze AAPL")
        .await
        .unwrap()
        .map(|item| item.unwrap())
        .collect()
        .await;
    assert_eq!(chunks, vec!["Tic", "ker"]);
}

#[tokio::test]
async fn backend_error_status_becomes_generation_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let provider = provider_for(&server);
    let mut session = provider.create_session().await.unwrap();
    let err = session.complete_prompt("analyze AAPL").await.unwrap_err();
    assert!(matches!(err, Error::Generation { .. }), "got: {err}");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn missing_content_is_a_generation_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let mut session = provider.create_session().await.unwrap();
    let err = session.complete_prompt("analyze AAPL").await.unwrap_err();
    assert!(matches!(err, Error::Generation { .. }));
}

#[tokio::test]
async fn missing_api_key_is_provider_unavailable() {
    let provider =
        HttpGenerationProvider::new(HttpProviderConfig::new("http://127.0.0.1:1", "test-model"))
            .unwrap();
    assert!(!provider.is_available());
    let err = provider.create_session().await.unwrap_err();
    assert!(err.is_unavailable());
}
