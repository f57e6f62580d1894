//! HTTP client for the meme sharing API.
//!
//! All calls carry the session's bearer token and surface 401/403 as
//! [`FeedError::Unauthorized`](crate::error::FeedError) so the caller can
//! run the global session-invalidation path.

mod comments;
mod memes;
mod pictures;
mod users;

pub use pictures::fetch_picture;

use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://api.meme-feed.example.com/api";

/// Meme API client. Cheap to clone; clones share the underlying
/// connection pool.
#[derive(Clone)]
pub struct MemeApi {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) base_url: String,
}

impl MemeApi {
    /// Creates a new API client with the given bearer token.
    pub fn new(token: String) -> Self {
        log::debug!("Creating meme API client, token length: {}", token.len());
        Self {
            client: Client::new(),
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different server (used by tests).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url,
        }
    }
}

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
