//! Meme feed retrieval and meme creation.

use log::{debug, info};
use reqwest::multipart;

use crate::error::{ApiResult, FeedError};
use crate::models::{Meme, NewMeme, Page};

use super::MemeApi;

impl MemeApi {
    /// Fetches one page of the meme feed (pages are 1-based).
    pub async fn get_memes(&self, page: u32) -> ApiResult<Page<Meme>> {
        let url = format!("{}/memes?page={}", self.base_url, page);
        debug!("Fetching memes page {page}");

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
        let memes: Page<Meme> = serde_json::from_str(&body)?;
        debug!(
            "Fetched memes page {page}: {} of {} total",
            memes.results.len(),
            memes.total
        );
        Ok(memes)
    }

    /// Submits a new meme as a single multipart request.
    ///
    /// Caption fields are index-aligned (`texts[i][content]`, `texts[i][x]`,
    /// `texts[i][y]`) in the captions' insertion order.
    pub async fn create_meme(&self, new_meme: &NewMeme) -> ApiResult<()> {
        let url = format!("{}/memes", self.base_url);
        info!(
            "Creating meme: {} bytes, {} captions",
            new_meme.picture.len(),
            new_meme.texts.len()
        );

        let mime = mime_guess::from_path(&new_meme.picture_filename)
            .first_or_octet_stream()
            .to_string();
        let picture_part = multipart::Part::bytes(new_meme.picture.clone())
            .file_name(new_meme.picture_filename.clone())
            .mime_str(&mime)
            .map_err(FeedError::Network)?;

        let mut form = multipart::Form::new()
            .part("picture", picture_part)
            .text("description", new_meme.description.clone());

        for (i, text) in new_meme.texts.iter().enumerate() {
            form = form
                .text(format!("texts[{i}][content]"), text.content.clone())
                .text(format!("texts[{i}][x]"), text.x.to_string())
                .text(format!("texts[{i}][y]"), text.y.to_string());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::from_status(response.status()));
        }

        info!("Meme created");
        Ok(())
    }
}
