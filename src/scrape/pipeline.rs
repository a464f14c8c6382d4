use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::browser::{BrowserSession, SessionFactory};
use crate::config::Config;
use crate::scrape::{
    category::{Category, Revelation, ScrapePlan},
    errors::ScrapeError,
    extract::{ExtractionResult, extract_text},
    popups::{DismissalOutcome, dismiss_popups},
    reveal::{RevealState, interact, scroll},
};

/// Runs one scrape per call against a fresh remote session.
#[derive(Clone)]
pub struct Scraper {
    sessions: Arc<dyn SessionFactory>,
    config: Arc<Config>,
}

impl Scraper {
    pub fn new(sessions: Arc<dyn SessionFactory>, config: Arc<Config>) -> Self {
        Self { sessions, config }
    }

    /// Open a session, drive it, and close it again whatever happened.
    #[instrument(skip(self))]
    pub async fn scrape(
        &self,
        url: &str,
        category: Category,
    ) -> Result<ExtractionResult, ScrapeError> {
        let plan = ScrapePlan::for_category(category, &self.config);
        let mut session = self.sessions.create(plan.session_settings(&self.config))?;

        let outcome = self.drive(session.as_mut(), url, &plan).await;

        info!("Closing session");
        if let Err(e) = session.close().await {
            warn!("Failed to close session: {}", e);
        }

        if let Err(e) = &outcome {
            warn!("Scrape of {} failed: {}", url, e);
        }
        outcome
    }

    async fn drive(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
        plan: &ScrapePlan,
    ) -> Result<ExtractionResult, ScrapeError> {
        session.init().await?;

        info!("Navigating to {}", url);
        session.navigate(url).await?;

        let pacing = self.config.pacing();
        match plan.revelation {
            Revelation::Scroll { count } => {
                log_dismissals(&dismiss_popups(session, &pacing).await);
                scroll(session, count, &pacing).await?;
            }
            Revelation::Interact {
                max_cycles,
                final_sweeps,
            } => {
                log_dismissals(&dismiss_popups(session, &pacing).await);
                let mut state = RevealState::new();
                interact(session, &mut state, max_cycles, final_sweeps, &pacing).await?;
                info!(
                    "Interaction finished after {} cycles, {} elements activated",
                    state.cycles(),
                    state.activated().len()
                );
            }
            Revelation::Agent { max_steps } => {
                info!("Delegating to agent with {} steps", max_steps);
                let outcome = session.agent_execute(&plan.agent_goal(), max_steps).await?;
                if !outcome.completed {
                    warn!("Agent stopped before completing its goal");
                }
                return ExtractionResult::from_text(outcome.message);
            }
        }

        extract_text(session, plan.instruction).await
    }
}

/// Returns how many popups were dismissed.
fn log_dismissals(outcomes: &[DismissalOutcome]) -> usize {
    let dismissed = outcomes.iter().filter(|o| o.is_dismissed()).count();
    info!("Dismissed {} of {} popups", dismissed, outcomes.len());
    dismissed
}
