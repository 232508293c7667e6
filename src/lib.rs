pub mod api;
pub mod app;
pub mod chat;
pub mod error;
pub mod icons;
pub mod utils;

#[cfg(feature = "gui")]
pub mod ui;
