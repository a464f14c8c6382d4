use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::browser::errors::BrowserError;

/// Browser window size requested for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Everything needed to start one remote browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub api_key: String,
    pub project_id: String,
    pub model_name: String,
    pub model_api_key: String,
    pub block_ads: bool,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActOptions {
    /// Hint forwarded to the remote side. The caller may also enforce it locally.
    pub timeout: Option<Duration>,
}

impl ActOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// A page element returned by `observe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl ObservedElement {
    pub fn new(selector: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            description: description.into(),
            method: None,
            arguments: Vec::new(),
        }
    }

    /// Identity used to avoid activating the same element twice: the selector
    /// when the backend provides one, otherwise the description.
    pub fn key(&self) -> &str {
        match self.selector.as_deref() {
            Some(selector) if !selector.trim().is_empty() => selector,
            _ => &self.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutcome {
    pub completed: bool,
    pub message: String,
}

/// One remote browser context, addressed by natural-language instructions.
///
/// A session is created unstarted; `init` must succeed before any page call,
/// and `close` must be safe to call whether or not `init` succeeded.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrowserSession: Send {
    async fn init(&mut self) -> Result<(), BrowserError>;

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    async fn act(&mut self, instruction: &str, options: ActOptions) -> Result<(), BrowserError>;

    async fn observe(&mut self, instruction: &str) -> Result<Vec<ObservedElement>, BrowserError>;

    async fn extract(&mut self, instruction: &str) -> Result<String, BrowserError>;

    /// Run the autonomous multi-step agent against the current page.
    async fn agent_execute(
        &mut self,
        goal: &str,
        max_steps: u32,
    ) -> Result<AgentOutcome, BrowserError>;

    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// Produces fresh sessions, one per request.
#[cfg_attr(test, mockall::automock)]
pub trait SessionFactory: Send + Sync {
    fn create(&self, settings: SessionSettings) -> Result<Box<dyn BrowserSession>, BrowserError>;
}
