//! Raw picture downloads.
//!
//! Picture URLs come back in meme payloads and point at public storage,
//! so this fetch takes no bearer token. The caller passes the shared
//! client so downloads reuse the same connection pool as API calls.

use reqwest::Client;

use crate::error::{ApiResult, FeedError};

/// Fetch picture bytes from a URL.
pub async fn fetch_picture(client: &Client, url: &str) -> ApiResult<Vec<u8>> {
    log::debug!("Fetching picture from URL: {url}");

    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::from_status(status));
    }
    Ok(response.bytes().await?.to_vec())
}
