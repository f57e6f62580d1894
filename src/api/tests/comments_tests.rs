//! Tests for comment retrieval and posting.

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{api_with_mock, comment_json, page_json};
use crate::error::FeedError;

#[tokio::test]
async fn get_meme_comments_parses_page() {
    let mock_server = MockServer::start().await;

    let body = page_json(vec![comment_json("c1", "m1"), comment_json("c2", "m1")], 12, 10);
    Mock::given(method("GET"))
        .and(path("/memes/m1/comments"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    let page = api.get_meme_comments("m1", 1).await.unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.results[0].meme_id, "m1");
    assert!(page.has_next(1));
    assert!(!page.has_next(2));
}

#[tokio::test]
async fn create_meme_comment_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/memes/m1/comments"))
        .and(body_json(serde_json::json!({"content": "nice one"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    api.create_meme_comment("m1", "nice one").await.unwrap();
}

#[tokio::test]
async fn create_meme_comment_401_is_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    assert!(matches!(
        api.create_meme_comment("m1", "hello").await,
        Err(FeedError::Unauthorized)
    ));
}

#[tokio::test]
async fn get_comments_500_is_http_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let api = api_with_mock(&mock_server);
    match api.get_meme_comments("m1", 1).await {
        Err(FeedError::HttpStatus(status)) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("Expected HttpStatus(500), got: {other:?}"),
    }
}
