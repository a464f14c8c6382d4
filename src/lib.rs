pub mod api;
pub mod app_state;
pub mod browser;
pub mod config;
pub mod health;
pub mod pdf;
pub mod scrape;
