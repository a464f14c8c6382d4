use async_trait::async_trait;
use axum::Router;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use glean::{
    api,
    app_state::AppState,
    browser::{
        ActOptions, AgentOutcome, BrowserError, BrowserSession, ObservedElement, SessionFactory,
        SessionSettings,
    },
    config::{Config, Pacing},
};

/// What a stub session answers.
#[derive(Clone, Default)]
pub struct Script {
    pub init_error: Option<String>,
    /// Any act whose instruction contains one of these fails.
    pub failing_acts: Vec<&'static str>,
    /// One entry per observe call; later calls see nothing.
    pub observations: Vec<Vec<ObservedElement>>,
    /// Every observe call returns elements never seen before.
    pub endless_observations: bool,
    pub extraction: String,
}

#[derive(Debug, Default)]
pub struct CallLog {
    pub created: Vec<SessionSettings>,
    pub inits: usize,
    pub navigated: Vec<String>,
    pub acts: Vec<String>,
    pub observes: usize,
    pub extracts: usize,
    pub closes: usize,
}

impl CallLog {
    pub fn acts_containing(&self, needle: &str) -> usize {
        self.acts.iter().filter(|a| a.contains(needle)).count()
    }
}

pub struct StubFactory {
    script: Script,
    log: Arc<Mutex<CallLog>>,
}

impl StubFactory {
    pub fn new(script: Script) -> (Self, Arc<Mutex<CallLog>>) {
        let log = Arc::new(Mutex::new(CallLog::default()));
        (
            Self {
                script,
                log: log.clone(),
            },
            log,
        )
    }
}

impl SessionFactory for StubFactory {
    fn create(&self, settings: SessionSettings) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.log.lock().unwrap().created.push(settings);
        Ok(Box::new(StubSession {
            observations: self.script.observations.clone().into(),
            script: self.script.clone(),
            log: self.log.clone(),
            generated: 0,
        }))
    }
}

struct StubSession {
    script: Script,
    observations: VecDeque<Vec<ObservedElement>>,
    log: Arc<Mutex<CallLog>>,
    generated: usize,
}

#[async_trait]
impl BrowserSession for StubSession {
    async fn init(&mut self) -> Result<(), BrowserError> {
        self.log.lock().unwrap().inits += 1;
        match &self.script.init_error {
            Some(message) => Err(BrowserError::Api {
                status: 401,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.log.lock().unwrap().navigated.push(url.to_string());
        Ok(())
    }

    async fn act(&mut self, instruction: &str, _options: ActOptions) -> Result<(), BrowserError> {
        self.log.lock().unwrap().acts.push(instruction.to_string());
        if self
            .script
            .failing_acts
            .iter()
            .any(|needle| instruction.contains(needle))
        {
            return Err(BrowserError::Timeout(std::time::Duration::from_secs(8)));
        }
        Ok(())
    }

    async fn observe(&mut self, _instruction: &str) -> Result<Vec<ObservedElement>, BrowserError> {
        self.log.lock().unwrap().observes += 1;
        if self.script.endless_observations {
            let start = self.generated;
            self.generated += 4;
            return Ok((start..self.generated)
                .map(|n| ObservedElement::new(format!("#gen-{}", n), format!("Generated {}", n)))
                .collect());
        }
        Ok(self.observations.pop_front().unwrap_or_default())
    }

    async fn extract(&mut self, _instruction: &str) -> Result<String, BrowserError> {
        self.log.lock().unwrap().extracts += 1;
        Ok(self.script.extraction.clone())
    }

    async fn agent_execute(
        &mut self,
        _goal: &str,
        _max_steps: u32,
    ) -> Result<AgentOutcome, BrowserError> {
        Ok(AgentOutcome {
            completed: true,
            message: self.script.extraction.clone(),
        })
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.log.lock().unwrap().closes += 1;
        Ok(())
    }
}

pub fn test_app(script: Script) -> (Router, Arc<Mutex<CallLog>>) {
    let (factory, log) = StubFactory::new(script);
    let config = Config::default().with_pacing(Pacing::immediate());
    let state = AppState::with_sessions(Arc::new(factory), config);
    (api::router(state), log)
}
