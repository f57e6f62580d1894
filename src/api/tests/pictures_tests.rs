//! Tests for raw picture downloads.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::fetch_picture;
use crate::error::FeedError;

#[tokio::test]
async fn fetch_picture_returns_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memes/m1.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47]))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/memes/m1.png", mock_server.uri());
    let bytes = fetch_picture(&client, &url).await.unwrap();
    assert_eq!(bytes, vec![0x89, 0x50, 0x4E, 0x47]);
}

#[tokio::test]
async fn fetch_picture_404_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/missing.png", mock_server.uri());
    match fetch_picture(&client, &url).await {
        Err(FeedError::HttpStatus(status)) => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        }
        other => panic!("Expected HttpStatus(404), got: {other:?}"),
    }
}

#[tokio::test]
async fn one_client_serves_many_downloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1]))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::new();
    let a = format!("{}/a.png", mock_server.uri());
    let b = format!("{}/b.png", mock_server.uri());
    assert!(fetch_picture(&client, &a).await.is_ok());
    assert!(fetch_picture(&client, &b).await.is_ok());
}
