//! Unit tests for the meme API client.

mod comments_tests;
mod pictures_tests;

use wiremock::MockServer;

use super::MemeApi;

pub(crate) fn api_with_mock(mock_server: &MockServer) -> MemeApi {
    MemeApi::with_base_url("test_token".to_string(), mock_server.uri())
}

pub(crate) fn user_json(id: &str, username: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "username": username,
        "pictureUrl": format!("https://example.com/avatars/{id}.png")
    })
}

pub(crate) fn meme_json(id: &str, author_id: &str, comments_count: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "authorId": author_id,
        "pictureUrl": format!("https://example.com/memes/{id}.png"),
        "description": format!("description of {id}"),
        "texts": [{"content": "top text", "x": 10, "y": 20}],
        "commentsCount": comments_count,
        "createdAt": "2025-01-15T12:00:00Z"
    })
}

pub(crate) fn comment_json(id: &str, meme_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "memeId": meme_id,
        "authorId": "u1",
        "content": format!("comment {id}"),
        "createdAt": "2025-01-15T12:00:00Z"
    })
}

pub(crate) fn page_json(results: Vec<serde_json::Value>, total: u32, page_size: u32) -> serde_json::Value {
    serde_json::json!({
        "results": results,
        "total": total,
        "pageSize": page_size
    })
}
