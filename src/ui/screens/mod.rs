mod create;
mod feed;
mod login;

pub use create::{CreateScreen, CreateState};
pub use feed::{FeedScreen, FeedState};
pub use login::{LoginScreen, LoginState};
