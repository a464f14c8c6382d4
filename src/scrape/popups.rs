use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::browser::{ActOptions, BrowserError, BrowserSession};
use crate::config::Pacing;

/// Dismissal actions, attempted in this order.
pub const POPUP_ACTIONS: [(&str, &str); 2] = [
    (
        "cookie banner",
        "Click the button that accepts all cookies or consent on the cookie banner",
    ),
    (
        "registration wall",
        "Close or dismiss the sign-up, registration or newsletter popup",
    ),
];

/// Result of one best-effort dismissal. A miss is never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DismissalOutcome {
    Dismissed,
    Missed { reason: String },
}

impl DismissalOutcome {
    pub fn is_dismissed(&self) -> bool {
        matches!(self, Self::Dismissed)
    }
}

#[must_use]
pub async fn dismiss_popups(
    session: &mut dyn BrowserSession,
    pacing: &Pacing,
) -> Vec<DismissalOutcome> {
    let mut outcomes = Vec::with_capacity(POPUP_ACTIONS.len());

    for (target, instruction) in POPUP_ACTIONS {
        let options = ActOptions::with_timeout(pacing.dismissal_timeout);
        let attempt = session.act(instruction, options);
        let outcome = match timeout(pacing.dismissal_timeout, attempt).await {
            Ok(Ok(())) => DismissalOutcome::Dismissed,
            Ok(Err(e)) => DismissalOutcome::Missed {
                reason: e.to_string(),
            },
            Err(_) => DismissalOutcome::Missed {
                reason: BrowserError::Timeout(pacing.dismissal_timeout).to_string(),
            },
        };

        match &outcome {
            DismissalOutcome::Dismissed => {
                info!("Dismissed {}", target);
                sleep(pacing.settle).await;
            }
            DismissalOutcome::Missed { reason } => {
                warn!("No {} dismissed: {}", target, reason);
            }
        }
        outcomes.push(outcome);
    }

    outcomes
}
