pub mod api;
pub mod cache;
pub mod error;
pub mod formatters;
pub mod models;
pub mod session;
pub mod ui;

// Re-export commonly used items
pub use api::MemeApi;
pub use cache::{with_retries, PaginatedQuery, UserCache};
pub use error::{ApiResult, FeedError};
pub use formatters::format_time_ago;
pub use models::{CaptionText, Comment, Meme, NewMeme, Page, User};
pub use session::Session;
