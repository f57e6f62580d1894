//! User lookup.

use log::debug;

use crate::error::{ApiResult, FeedError};
use crate::models::User;

use super::MemeApi;

impl MemeApi {
    /// Fetches a single user by id.
    pub async fn get_user_by_id(&self, user_id: &str) -> ApiResult<User> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        debug!("Fetching user {user_id}");

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
        let user: User = serde_json::from_str(&body)?;
        debug!("Fetched user {} ({})", user.id, user.username);
        Ok(user)
    }
}
