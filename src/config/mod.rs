//! Configuration handling for the application.
//!
//! Everything is read from environment variables once at startup. Provider
//! secrets are passed through untouched: when they are missing the remote
//! session refuses to start and the request fails with a server error, so we
//! deliberately do not validate them here. Tunables that we parse ourselves
//! (strategy, step budget, log format) fail fast with a `ConfigError`.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable names.
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_BROWSERBASE_API_KEY: &str = "BROWSERBASE_API_KEY";
pub const ENV_BROWSERBASE_PROJECT_ID: &str = "BROWSERBASE_PROJECT_ID";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_STAGEHAND_API_URL: &str = "STAGEHAND_API_URL";
pub const ENV_ARTICLE_MODEL: &str = "ARTICLE_MODEL";
pub const ENV_WEBSITE_MODEL: &str = "WEBSITE_MODEL";
pub const ENV_WEBSITE_STRATEGY: &str = "WEBSITE_STRATEGY";
pub const ENV_AGENT_MAX_STEPS: &str = "AGENT_MAX_STEPS";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Default values used when environment variables are absent.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_STAGEHAND_API_URL: &str = "https://api.stagehand.browserbase.com/v1";
const DEFAULT_ARTICLE_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_WEBSITE_MODEL: &str = "google/gemini-2.5-pro";
const DEFAULT_AGENT_MAX_STEPS: u32 = 25;

/// How the `Website` category reveals hidden content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebsiteStrategy {
    /// Observe/click cycles driven by this service.
    #[default]
    Loop,
    /// Hand a single goal to the remote autonomous agent.
    Agent,
}

impl FromStr for WebsiteStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "agent" => Ok(Self::Agent),
            other => Err(format!("expected 'loop' or 'agent', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{}'", other)),
        }
    }
}

/// Pauses and timeouts used while driving a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after a popup was dismissed.
    pub settle: Duration,
    /// Pause after every scroll action.
    pub scroll: Duration,
    /// Pause after activating an interactive element.
    pub click: Duration,
    /// Upper bound for a single popup dismissal action.
    pub dismissal_timeout: Duration,
}

impl Pacing {
    /// No pauses at all. Used by tests and stub sessions.
    pub const fn immediate() -> Self {
        Self {
            settle: Duration::ZERO,
            scroll: Duration::ZERO,
            click: Duration::ZERO,
            dismissal_timeout: Duration::from_secs(8),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1500),
            scroll: Duration::from_millis(1500),
            click: Duration::from_millis(1000),
            dismissal_timeout: Duration::from_secs(8),
        }
    }
}

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    bind_addr: String,
    browserbase_api_key: String,
    browserbase_project_id: String,
    model_api_key: String,
    stagehand_api_url: String,
    article_model: String,
    website_model: String,
    website_strategy: WebsiteStrategy,
    agent_max_steps: u32,
    log_format: LogFormat,
    pacing: Pacing,
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let website_strategy = parse_var(ENV_WEBSITE_STRATEGY, "website_strategy")?;
        let log_format = parse_var(ENV_LOG_FORMAT, "log_format")?;
        let agent_max_steps = match env::var(ENV_AGENT_MAX_STEPS) {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        field: "agent_max_steps",
                        reason: format!("expected a positive integer, got '{}'", raw),
                    });
                }
                Ok(steps) => steps,
            },
            Err(_) => DEFAULT_AGENT_MAX_STEPS,
        };

        Ok(Self {
            bind_addr: var_or(ENV_BIND_ADDR, DEFAULT_BIND_ADDR),
            browserbase_api_key: var_or(ENV_BROWSERBASE_API_KEY, ""),
            browserbase_project_id: var_or(ENV_BROWSERBASE_PROJECT_ID, ""),
            model_api_key: var_or(ENV_GOOGLE_API_KEY, ""),
            stagehand_api_url: var_or(ENV_STAGEHAND_API_URL, DEFAULT_STAGEHAND_API_URL),
            article_model: var_or(ENV_ARTICLE_MODEL, DEFAULT_ARTICLE_MODEL),
            website_model: var_or(ENV_WEBSITE_MODEL, DEFAULT_WEBSITE_MODEL),
            website_strategy,
            agent_max_steps,
            log_format,
            pacing: Pacing::default(),
        })
    }

    /// Defaults with no environment overrides and no secrets.
    pub fn default() -> Self {
        // not `Default` impl yet to keep explicit semantics
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            browserbase_api_key: String::new(),
            browserbase_project_id: String::new(),
            model_api_key: String::new(),
            stagehand_api_url: DEFAULT_STAGEHAND_API_URL.to_string(),
            article_model: DEFAULT_ARTICLE_MODEL.to_string(),
            website_model: DEFAULT_WEBSITE_MODEL.to_string(),
            website_strategy: WebsiteStrategy::default(),
            agent_max_steps: DEFAULT_AGENT_MAX_STEPS,
            log_format: LogFormat::default(),
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_website_strategy(mut self, strategy: WebsiteStrategy) -> Self {
        self.website_strategy = strategy;
        self
    }

    pub fn with_stagehand_api_url(mut self, url: impl Into<String>) -> Self {
        self.stagehand_api_url = url.into();
        self
    }

    /// TCP bind address (host:port) for the HTTP server.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    pub fn browserbase_api_key(&self) -> &str {
        &self.browserbase_api_key
    }
    pub fn browserbase_project_id(&self) -> &str {
        &self.browserbase_project_id
    }
    /// Key for the model backend used by act/observe/extract.
    pub fn model_api_key(&self) -> &str {
        &self.model_api_key
    }
    /// Base URL of the hosted session API, without trailing slash.
    pub fn stagehand_api_url(&self) -> &str {
        self.stagehand_api_url.trim_end_matches('/')
    }
    pub fn article_model(&self) -> &str {
        &self.article_model
    }
    pub fn website_model(&self) -> &str {
        &self.website_model
    }
    pub fn website_strategy(&self) -> WebsiteStrategy {
        self.website_strategy
    }
    pub fn agent_max_steps(&self) -> u32 {
        self.agent_max_steps
    }
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, field: &'static str) -> Result<T, ConfigError>
where
    T: FromStr<Err = String> + Default,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|reason| ConfigError::InvalidValue { field, reason }),
        Err(_) => Ok(T::default()),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
