use std::time::Duration;

use legalswami_types::{ChatMessage, DispatchError, FailureKind};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{CompletionUpstream, UpstreamClient};

fn client_for(server: &MockServer) -> UpstreamClient {
    let url = format!("{}/openai/v1/chat/completions", server.uri());
    UpstreamClient::new(&url, Duration::from_secs(5)).expect("valid mock url")
}

#[test]
fn test_rejects_invalid_url() {
    assert!(UpstreamClient::new("not a url", Duration::from_secs(5)).is_err());
}

#[tokio::test]
async fn test_sends_bearer_and_fixed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("Authorization", "Bearer gsk_test"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "model": "m1",
            "messages": [{"role": "user", "content": "hi"}],
            "max_tokens": 4000,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = client_for(&server)
        .complete("gsk_test", "m1", &[ChatMessage::user("hi")])
        .await
        .expect("completion should succeed");
    assert_eq!(content, "hello");
}

#[tokio::test]
async fn test_error_status_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"error":{"code":"model_decommissioned"}}"#),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("k", "old-model", &[ChatMessage::user("hi")])
        .await
        .expect_err("400 must fail");
    match err {
        DispatchError::Upstream { status, kind, ref model, .. } => {
            assert_eq!(status, 400);
            assert_eq!(kind, FailureKind::ModelUnavailable);
            assert_eq!(model, "old-model");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_is_flagged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("k", "m1", &[ChatMessage::user("hi")])
        .await
        .expect_err("401 must fail");
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("k", "m1", &[ChatMessage::user("hi")])
        .await
        .expect_err("non-JSON body must fail");
    assert!(matches!(err, DispatchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_missing_content_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete("k", "m1", &[ChatMessage::user("hi")])
        .await
        .expect_err("empty choices must fail");
    assert!(matches!(err, DispatchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(serde_json::json!({"choices": [{"message": {"content": "late"}}]})),
        )
        .mount(&server)
        .await;

    let url = format!("{}/openai/v1/chat/completions", server.uri());
    let client = UpstreamClient::new(&url, Duration::from_millis(200)).expect("valid mock url");
    let err = client
        .complete("k", "m1", &[ChatMessage::user("hi")])
        .await
        .expect_err("slow upstream must time out");
    assert!(matches!(err, DispatchError::Transport { timed_out: true, .. }), "got {err:?}");
}
