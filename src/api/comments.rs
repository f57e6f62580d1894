//! Comment thread retrieval and comment creation.

use log::{debug, info};
use serde::Serialize;

use crate::error::{ApiResult, FeedError};
use crate::models::{Comment, Page};

use super::MemeApi;

#[derive(Serialize)]
struct NewCommentBody<'a> {
    content: &'a str,
}

impl MemeApi {
    /// Fetches one page of a meme's comment thread (pages are 1-based).
    pub async fn get_meme_comments(
        &self,
        meme_id: &str,
        page: u32,
    ) -> ApiResult<Page<Comment>> {
        let url = format!(
            "{}/memes/{}/comments?page={}",
            self.base_url, meme_id, page
        );
        debug!("Fetching comments page {page} for meme {meme_id}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::from_status(response.status()));
        }

        let body = response.text().await?;
        let comments: Page<Comment> = serde_json::from_str(&body)?;
        debug!(
            "Fetched comments page {page} for meme {meme_id}: {} of {}",
            comments.results.len(),
            comments.total
        );
        Ok(comments)
    }

    /// Posts a comment on a meme. The caller is responsible for refusing
    /// empty content before this is ever reached.
    pub async fn create_meme_comment(&self, meme_id: &str, content: &str) -> ApiResult<()> {
        let url = format!("{}/memes/{}/comments", self.base_url, meme_id);
        info!("Posting comment on meme {meme_id}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&NewCommentBody { content })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::from_status(response.status()));
        }

        info!("Comment posted on meme {meme_id}");
        Ok(())
    }
}
