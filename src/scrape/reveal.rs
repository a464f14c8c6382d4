//! Content revelation: get everything the page can show onto the screen
//! before the extraction call runs.
//!
//! Articles only need scrolling. Interactive websites hide text behind tabs,
//! accordions and "read more" toggles, so the interaction loop repeatedly
//! observes clickable controls and activates the ones it has not touched yet.
//! Both the number of cycles and the per-request `activated` set bound the
//! work on pages whose controls regenerate after every click.

use std::collections::HashSet;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::browser::{ActOptions, BrowserError, BrowserSession, ObservedElement};
use crate::config::Pacing;
use crate::scrape::category::INTERACTIVE_ELEMENTS_QUERY;

pub const SCROLL_DOWN: &str = "scroll down";
pub const SCROLL_TO_BOTTOM: &str = "scroll to the bottom of the page";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    Failed { reason: String },
}

/// Per-request loop state.
#[derive(Debug, Default)]
pub struct RevealState {
    activated: HashSet<String>,
    cycles: usize,
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn activated(&self) -> &HashSet<String> {
        &self.activated
    }

    pub fn is_activated(&self, element: &ObservedElement) -> bool {
        self.activated.contains(element.key())
    }

    /// Returns false when the element had already been recorded.
    fn record(&mut self, element: &ObservedElement) -> bool {
        self.activated.insert(element.key().to_string())
    }
}

/// Scroll down `count` times, pausing after each so lazy content can load.
pub async fn scroll(
    session: &mut dyn BrowserSession,
    count: usize,
    pacing: &Pacing,
) -> Result<(), BrowserError> {
    info!("Scrolling {} times to load the full page", count);
    for i in 0..count {
        session.act(SCROLL_DOWN, ActOptions::default()).await?;
        sleep(pacing.scroll).await;
        debug!("Scrolled {}/{}", i + 1, count);
    }
    Ok(())
}

/// Observe/activate cycles followed by a short sweep to the bottom.
///
/// A cycle that finds nothing, or finds only elements already activated,
/// ends the loop. Elements with neither a selector nor a description cannot
/// be told apart and are never activated. Individual activation failures are logged and counted as
/// activated so the same control is never retried.
pub async fn interact(
    session: &mut dyn BrowserSession,
    state: &mut RevealState,
    max_cycles: usize,
    final_sweeps: usize,
    pacing: &Pacing,
) -> Result<(), BrowserError> {
    while state.cycles < max_cycles {
        state.cycles += 1;
        let cycle = state.cycles;

        let elements = session.observe(INTERACTIVE_ELEMENTS_QUERY).await?;
        info!(
            "Cycle {}/{}: observed {} interactive elements",
            cycle,
            max_cycles,
            elements.len()
        );
        if elements.is_empty() {
            break;
        }

        let mut newly_activated = 0;
        for element in &elements {
            if element.key().trim().is_empty() {
                debug!("Skipping element with no selector or description");
                continue;
            }
            if !state.record(element) {
                continue;
            }
            newly_activated += 1;

            match activate(session, element).await {
                ActivationOutcome::Activated => debug!("Activated '{}'", element.key()),
                ActivationOutcome::Failed { reason } => {
                    warn!("Could not activate '{}': {}", element.key(), reason)
                }
            }
            sleep(pacing.click).await;
        }

        if newly_activated == 0 {
            info!("Cycle {} found no new elements, stopping", cycle);
            break;
        }
    }

    for _ in 0..final_sweeps {
        session.act(SCROLL_TO_BOTTOM, ActOptions::default()).await?;
        sleep(pacing.scroll).await;
    }
    Ok(())
}

async fn activate(
    session: &mut dyn BrowserSession,
    element: &ObservedElement,
) -> ActivationOutcome {
    let instruction = format!("Click the element: {}", element.description);
    let instruction = match element.selector.as_deref() {
        Some(selector) if !selector.trim().is_empty() => {
            format!("{} (selector: {})", instruction, selector)
        }
        _ => instruction,
    };

    match session.act(&instruction, ActOptions::default()).await {
        Ok(()) => ActivationOutcome::Activated,
        Err(e) => ActivationOutcome::Failed {
            reason: e.to_string(),
        },
    }
}
