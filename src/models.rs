//! Data model for memes, comments, users and paginated responses.
//!
//! All of these are created server-side and fetched read-only; the wire
//! format uses camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A caption overlay positioned on a meme picture.
///
/// In the creation editor these live purely in local state until submit;
/// list order is insertion order and is the order rendered and submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionText {
    pub content: String,
    pub x: i32,
    pub y: i32,
}

/// One feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meme {
    pub id: String,
    pub author_id: String,
    pub picture_url: String,
    pub description: String,
    #[serde(default)]
    pub texts: Vec<CaptionText>,
    /// Server-authoritative; the client never increments this locally.
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
}

/// One comment on a meme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub meme_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub picture_url: String,
}

/// One page of a paginated collection response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Total number of pages the server holds: `ceil(total / page_size)`.
    pub fn page_count(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// Whether another page exists after `last_page_number` (1-based).
    pub fn has_next(&self, last_page_number: u32) -> bool {
        self.page_count() > last_page_number
    }
}

/// Everything needed to submit a new meme in one multipart request.
#[derive(Debug, Clone)]
pub struct NewMeme {
    pub picture: Vec<u8>,
    pub picture_filename: String,
    pub description: String,
    pub texts: Vec<CaptionText>,
}
