//! Line-oriented terminal front end.

pub mod app;
pub mod prompt;
pub mod render;
