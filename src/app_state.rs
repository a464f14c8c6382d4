use crate::browser::{RemoteSessionFactory, SessionFactory};
use crate::config::Config;
use crate::scrape::Scraper;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub scraper: Scraper,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions: Arc<dyn SessionFactory> =
            Arc::new(RemoteSessionFactory::new(config.stagehand_api_url()));
        Self::with_sessions(sessions, config)
    }

    /// Build state around any session backend (stubs in tests).
    pub fn with_sessions(sessions: Arc<dyn SessionFactory>, config: Config) -> Self {
        Self {
            scraper: Scraper::new(sessions, Arc::new(config)),
        }
    }
}
