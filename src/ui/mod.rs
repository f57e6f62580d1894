pub mod app;
pub mod components;
pub mod screens;
pub mod state;

pub use app::{launch_gui, MemeApp};
