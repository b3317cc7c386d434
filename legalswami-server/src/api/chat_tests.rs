use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use legalswami_types::ChatMessage;

use super::chat::{send_chat, ChatRequest};
use crate::test_helpers::{test_app_state, test_app_state_with, FixedUpstream, TEST_KEY};

fn request(message: &str) -> Json<ChatRequest> {
    Json(ChatRequest { message: message.to_string(), history: Vec::new() })
}

#[tokio::test]
async fn test_chat_returns_answer_and_model() {
    let state = test_app_state();
    let Json(reply) = send_chat(State(state), request("What is bail?")).await.expect("chat ok");
    assert_eq!(reply.response, "ok");
    assert_eq!(reply.model, "m1");
}

#[tokio::test]
async fn test_chat_sends_system_prompt_history_and_question() {
    let state = test_app_state_with(&["m1"], &[TEST_KEY], FixedUpstream::echoing());
    let payload = ChatRequest {
        message: "  And for tenants?  ".to_string(),
        history: vec![ChatMessage::user("What is a lease?"), ChatMessage::assistant("A contract.")],
    };
    let Json(reply) = send_chat(State(state), Json(payload)).await.expect("chat ok");
    assert_eq!(reply.response, "4:And for tenants?");
}

#[tokio::test]
async fn test_blank_message_is_bad_request() {
    let state = test_app_state();
    let Err((status, _)) = send_chat(State(state), request("   ")).await else {
        panic!("blank message must be rejected");
    };
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_keys_is_service_unavailable() {
    let state = test_app_state_with(&["m1"], &[], FixedUpstream::answering("never"));
    let Err((status, message)) = send_chat(State(state), request("hi")).await else {
        panic!("empty pool must be rejected");
    };
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(message.contains("API key"));
}

#[tokio::test]
async fn test_exhaustion_is_sanitized() {
    let state = test_app_state_with(&["m1", "m2"], &[TEST_KEY], FixedUpstream::failing());
    let Err((status, message)) = send_chat(State(state.clone()), request("hi")).await else {
        panic!("failing upstream must surface an error");
    };
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(message.contains("temporarily unavailable"));
    assert!(!message.contains("secret detail"));
    assert!(state.dispatcher().statistics().iter().all(|s| s.failures == 1));
}

/// m1 answers slowly on the test key and fails at once on any other key.
struct SlowFirstKeyUpstream;

#[async_trait::async_trait]
impl legalswami_core::routing::upstream::CompletionUpstream for SlowFirstKeyUpstream {
    async fn complete(
        &self,
        api_key: &str,
        model: &str,
        _messages: &[ChatMessage],
    ) -> Result<String, legalswami_types::DispatchError> {
        if model != "m1" {
            return Ok(format!("from {model}"));
        }
        if api_key != TEST_KEY {
            return Err(legalswami_types::DispatchError::Upstream {
                model: model.to_string(),
                status: 500,
                kind: legalswami_types::FailureKind::ServerError,
                message: "API Error: boom".to_string(),
            });
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        Ok("from m1".to_string())
    }
}

#[tokio::test]
async fn test_reply_names_the_model_that_answered() {
    use std::sync::Arc;

    use legalswami_core::routing::upstream::CompletionUpstream;
    use legalswami_core::{CredentialPool, DispatcherSettings, ModelDispatcher};

    const SECOND_KEY: &str = "gsk_secondsecondsecondsecondsecondsecond02";
    let pool = Arc::new(CredentialPool::from_secrets([TEST_KEY, SECOND_KEY]));
    let settings =
        DispatcherSettings { fallback_delay: std::time::Duration::ZERO, ..Default::default() };
    let dispatcher = Arc::new(ModelDispatcher::new(
        ["m1", "m2"],
        Arc::clone(&pool),
        Arc::new(SlowFirstKeyUpstream) as Arc<dyn CompletionUpstream>,
        settings,
    ));
    let state = crate::state::AppState::new_with_components(
        pool,
        dispatcher,
        legalswami_types::RouterConfig::default(),
    );

    let (slow, fast) = tokio::join!(
        send_chat(State(state.clone()), request("first")),
        send_chat(State(state.clone()), request("second")),
    );

    let Json(slow) = slow.expect("slow call answers");
    let Json(fast) = fast.expect("fast call answers");
    assert_eq!((slow.response.as_str(), slow.model.as_str()), ("from m1", "m1"));
    assert_eq!((fast.response.as_str(), fast.model.as_str()), ("from m2", "m2"));
    assert_eq!(state.dispatcher().current_model(), "m2");
}
