mod common;

use std::time::Duration;

use common::stub::{Reply, spawn_stub};
use serde_json::json;
use tagger::classify::{AnnotateOptions, annotate_rows};
use tagger::{ClassifyError, Config, FeedbackStore, LabelProvider, OpenAiProvider, RetryPolicy};
use tempfile::TempDir;

fn provider(url: String, max_attempts: u32) -> OpenAiProvider {
    OpenAiProvider::new(
        url,
        "sk-test",
        "gpt-4o-mini",
        RetryPolicy::new(max_attempts, Duration::from_millis(1)),
        Duration::from_secs(5),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn test_sends_chat_completion_request() {
    let stub = spawn_stub().await;
    stub.enqueue(Reply::label("  East Asian \n"));

    let label = provider(stub.url(), 3)
        .classify("Li Wei", "Classify names.")
        .await
        .unwrap();

    assert_eq!(label, "East Asian");
    let received = stub.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].authorization.as_deref(), Some("Bearer sk-test"));
    assert_eq!(
        received[0].body["messages"],
        json!([
            {"role": "system", "content": "Classify names."},
            {"role": "user", "content": "Name: Li Wei"}
        ])
    );
    assert_eq!(received[0].body["model"], "gpt-4o-mini");
    assert_eq!(received[0].body["temperature"], 0.0);
}

#[tokio::test]
async fn test_retries_retryable_status_then_succeeds() {
    let stub = spawn_stub().await;
    stub.enqueue(Reply::status(503, "overloaded"));
    stub.enqueue(Reply::status(429, "slow down"));
    stub.enqueue(Reply::label("Indian"));

    let label = provider(stub.url(), 3)
        .classify("Rahul", "p")
        .await
        .unwrap();

    assert_eq!(label, "Indian");
    assert_eq!(stub.request_count(), 3);
}

#[tokio::test]
async fn test_gives_up_after_max_attempts() {
    let stub = spawn_stub().await;
    stub.set_fallback(Reply::status(502, "bad gateway"));

    let err = provider(stub.url(), 2)
        .classify("Rahul", "p")
        .await
        .unwrap_err();

    match err {
        ClassifyError::Http { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("bad gateway"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(stub.request_count(), 2);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let stub = spawn_stub().await;
    stub.set_fallback(Reply::status(400, "bad request"));

    let err = provider(stub.url(), 3)
        .classify("Rahul", "p")
        .await
        .unwrap_err();

    assert!(matches!(err, ClassifyError::Http { status: 400, .. }));
    assert_eq!(stub.request_count(), 1);
}

#[tokio::test]
async fn test_malformed_response_is_not_retried() {
    let stub = spawn_stub().await;
    stub.set_fallback(Reply::raw(json!({"choices": []})));

    let err = provider(stub.url(), 3)
        .classify("Rahul", "p")
        .await
        .unwrap_err();

    assert!(matches!(err, ClassifyError::UnexpectedResponse(_)));
    assert_eq!(stub.request_count(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() {
    let stub = spawn_stub().await;
    let url = stub.url();
    drop(stub);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = provider(url, 2).classify("Rahul", "p").await.unwrap_err();

    assert!(matches!(err, ClassifyError::Network(_)));
}

#[tokio::test]
async fn test_from_config_uses_configured_endpoint() {
    let stub = spawn_stub().await;
    stub.enqueue(Reply::label("Latino"));
    let config = Config {
        api_key: Some("sk-config".to_string()),
        api_url: stub.url(),
        model: "gpt-4o".to_string(),
        ca_bundle: None,
        ..Default::default()
    };

    let provider = OpenAiProvider::from_config(&config).unwrap();
    assert_eq!(provider.model(), "gpt-4o");
    assert_eq!(provider.classify("Ana", "p").await.unwrap(), "Latino");
    assert_eq!(
        stub.received()[0].authorization.as_deref(),
        Some("Bearer sk-config")
    );
}

#[tokio::test]
async fn test_annotate_against_endpoint_uses_cache_and_examples() {
    let dir = TempDir::new().unwrap();
    let mut store = FeedbackStore::load(dir.path().join("feedback.csv")).unwrap();
    store.append("Rahul Sharma", "Indian", "").unwrap();
    store.append("Raul Gomez", "Latino", "").unwrap();

    let stub = spawn_stub().await;
    stub.set_fallback(Reply::label("Indian"));

    let rows = vec![
        vec!["name".to_string(), "email".to_string()],
        vec!["raul gomez".to_string(), "r@example.com".to_string()],
        vec!["Rahul".to_string(), "rahul@example.com".to_string()],
    ];
    let options = AnnotateOptions {
        prompt: "Base.".to_string(),
        fewshot_count: 1,
        ..Default::default()
    };

    let annotated = annotate_rows(rows, &store, &provider(stub.url(), 1), &options)
        .await
        .unwrap();

    assert_eq!(annotated.rows[1][1], "Latino");
    assert_eq!(annotated.rows[2][1], "Indian");
    assert_eq!(annotated.summary.cached, 1);
    assert_eq!(annotated.summary.model, 1);

    let received = stub.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].body["messages"][0]["content"],
        "Base.\n\nPreviously approved mappings:\n- Rahul Sharma -> Indian"
    );
}
