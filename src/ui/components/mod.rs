pub mod comment_card;
pub mod file_picker;
pub mod meme_card;
pub mod meme_picture;

pub use file_picker::FilePicker;
pub use meme_picture::MemePicture;
