use axum::extract::State;
use axum::response::Json;

use super::keys::list_keys;
use super::get_status;
use crate::test_helpers::{test_app_state, test_app_state_with, FixedUpstream};

#[tokio::test]
async fn test_list_keys_shows_previews_only() {
    let state = test_app_state();
    state.pool().acquire();

    let Json(response) = list_keys(State(state)).await;
    assert_eq!(response.available, 1);
    assert!(response.ready);
    assert_eq!(response.keys[0].preview, "gsk_test...");
    assert_eq!(response.keys[0].requests, 1);
}

#[tokio::test]
async fn test_status_reports_readiness() {
    let Json(ready) = get_status(State(test_app_state())).await;
    assert!(ready.ready);
    assert_eq!(ready.available_keys, 1);
    assert_eq!(ready.current_model, "m1");
    assert_eq!(ready.upstream_url, legalswami_types::models::DEFAULT_UPSTREAM_URL);
    assert_eq!(ready.request_timeout_secs, 30);

    let empty = test_app_state_with(&["m1"], &[], FixedUpstream::answering("x"));
    let Json(not_ready) = get_status(State(empty)).await;
    assert!(!not_ready.ready);
    assert_eq!(not_ready.available_keys, 0);
}
