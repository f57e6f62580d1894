//! Tests for the retry policy.

use std::sync::atomic::{AtomicU32, Ordering};

use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::with_retries;
use crate::api::MemeApi;
use crate::error::FeedError;

fn api_with_mock(mock_server: &MockServer) -> MemeApi {
    MemeApi::with_base_url("test_token".to_string(), mock_server.uri())
}

fn user_body() -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "username": "alice",
        "pictureUrl": "https://example.com/u1.png"
    })
}

#[tokio::test]
async fn succeeds_first_try_without_retrying() {
    let counter = AtomicU32::new(0);
    let result = with_retries(|| {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, FeedError>(42) }
    })
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_transient_failures_then_succeeds() {
    let mock_server = MockServer::start().await;

    // First two attempts fail, the third lands.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    let user = with_retries(|| api.get_user_by_id("u1")).await.unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn gives_up_after_three_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    let result = with_retries(|| api.get_user_by_id("u1")).await;
    assert!(matches!(result, Err(FeedError::HttpStatus(_))));
}

#[tokio::test]
async fn unauthorized_is_never_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    let result = with_retries(|| api.get_user_by_id("u1")).await;
    assert!(matches!(result, Err(FeedError::Unauthorized)));
}

#[tokio::test]
async fn parse_errors_are_not_retried() {
    let counter = AtomicU32::new(0);
    let result: Result<u32, _> = with_retries(|| {
        counter.fetch_add(1, Ordering::SeqCst);
        async {
            let err = serde_json::from_str::<u32>("bogus").unwrap_err();
            Err(FeedError::Parse(err))
        }
    })
    .await;

    assert!(matches!(result, Err(FeedError::Parse(_))));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
