use std::time::Duration;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use pyrus_client::{
    webhook_router, ClientConfig, PyrusClient, WebhookVerifier, MAX_EVENT_BYTES, SIGNATURE_HEADER,
};
use secrecy::SecretString;
use serde_json::json;
use tower::ServiceExt;

const KEY: &str = "bot-security-key";

fn verifier() -> WebhookVerifier {
    WebhookVerifier::new(&SecretString::from(KEY)).unwrap()
}

fn event_body(task_id: i64) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "event": "comment",
        "access_token": "bot-token",
        "task_id": task_id,
        "user_id": 1731,
        "task": {
            "id": task_id,
            "text": "Approve the invoice",
            "create_date": "2024-03-01T09:30:00Z",
            "comments": [{"id": 5, "text": "Please review"}]
        }
    }))
    .unwrap()
}

fn signed_request(body: Vec<u8>, signature: &str) -> Request<Body> {
    Request::post("/")
        .header(SIGNATURE_HEADER, signature)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_signed_event_is_delivered() {
    let (router, mut events) = webhook_router(verifier(), 10);
    let body = event_body(42);
    let signature = verifier().sign(&body);

    let (status, _) = send(&router, signed_request(body, &signature)).await;

    assert_eq!(status, StatusCode::OK);
    let event = events.recv().await.unwrap();
    assert_eq!(event.task_id, 42);
    assert_eq!(event.access_token, "bot-token");
    let task = event.task.unwrap();
    assert_eq!(task.task.header.text, "Approve the invoice");
    assert_eq!(task.comments.len(), 1);
}

#[tokio::test]
async fn test_uppercase_signature_is_accepted() {
    let (router, mut events) = webhook_router(verifier(), 10);
    let body = event_body(7);
    let signature = verifier().sign(&body).to_uppercase();

    let (status, _) = send(&router, signed_request(body, &signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.recv().await.unwrap().task_id, 7);
}

#[tokio::test]
async fn test_altered_body_is_rejected() {
    let (router, mut events) = webhook_router(verifier(), 10);
    let signature = verifier().sign(&event_body(1));

    let (status, body) = send(&router, signed_request(event_body(2), &signature)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "invalid signature"}));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_missing_signature_is_rejected() {
    let (router, mut events) = webhook_router(verifier(), 10);
    let request = Request::post("/").body(Body::from(event_body(1))).unwrap();

    let (status, _) = send(&router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_undecodable_event_is_bad_request() {
    let (router, mut events) = webhook_router(verifier(), 10);
    let body = b"{\"task_id\": \"not a number\"}".to_vec();
    let signature = verifier().sign(&body);

    let (status, body) = send(&router, signed_request(body, &signature)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid event"));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_event_larger_than_axum_default_is_delivered() {
    let (router, mut events) = webhook_router(verifier(), 10);
    let long_text = "x".repeat(3 * 1024 * 1024);
    let body = serde_json::to_vec(&json!({
        "event": "comment",
        "access_token": "bot-token",
        "task_id": 11,
        "task": {"id": 11, "comments": [{"id": 1, "text": long_text}]}
    }))
    .unwrap();
    assert!(body.len() > 2 * 1024 * 1024 && body.len() < MAX_EVENT_BYTES);
    let signature = verifier().sign(&body);

    let (status, _) = send(&router, signed_request(body, &signature)).await;

    assert_eq!(status, StatusCode::OK);
    let event = events.recv().await.unwrap();
    assert_eq!(event.task.unwrap().comments[0].text.len(), 3 * 1024 * 1024);
}

#[tokio::test]
async fn test_dropped_receiver_is_server_error() {
    let (router, events) = webhook_router(verifier(), 10);
    drop(events);
    let body = event_body(3);
    let signature = verifier().sign(&body);

    let (status, body) = send(&router, signed_request(body, &signature)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "event receiver dropped"}));
}

#[tokio::test]
async fn test_full_channel_holds_the_request() {
    let (router, mut events) = webhook_router(verifier(), 1);

    let first = event_body(1);
    let signature = verifier().sign(&first);
    let (status, _) = send(&router, signed_request(first, &signature)).await;
    assert_eq!(status, StatusCode::OK);

    let second = event_body(2);
    let signature = verifier().sign(&second);
    let pending_router = router.clone();
    let mut pending = tokio::spawn(async move {
        send(&pending_router, signed_request(second, &signature)).await.0
    });

    assert!(
        tokio::time::timeout(Duration::from_millis(100), &mut pending)
            .await
            .is_err()
    );

    assert_eq!(events.recv().await.unwrap().task_id, 1);
    assert_eq!(pending.await.unwrap(), StatusCode::OK);
    assert_eq!(events.recv().await.unwrap().task_id, 2);
}

#[tokio::test]
async fn test_client_webhook_uses_security_key() {
    let client = PyrusClient::new(ClientConfig::new("bot@example.com", KEY)).unwrap();
    let (router, mut events) = client.webhook();
    let body = event_body(9);
    let signature = verifier().sign(&body);

    let (status, _) = send(&router, signed_request(body, &signature)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.recv().await.unwrap().task_id, 9);
}
