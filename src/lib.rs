pub mod api;
pub mod app_state;
pub mod classifier;
pub mod config;
pub mod detector;
pub mod extractor;
pub mod fetcher;
pub mod health;
