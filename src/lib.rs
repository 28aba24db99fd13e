pub mod cache;
pub mod commands;
pub mod config;
pub mod data_provider;
pub mod error;
pub mod fixtures;
pub mod layout_constants;
pub mod picker;
pub mod range;
pub mod tui;
pub mod types;

#[cfg(any(test, feature = "development"))]
pub mod dev;
