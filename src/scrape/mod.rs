pub mod category;
pub mod errors;
pub mod extract;
pub mod pipeline;
pub mod popups;
pub mod reveal;

pub use category::{Category, Revelation, ScrapePlan};
pub use errors::ScrapeError;
pub use extract::ExtractionResult;
pub use pipeline::Scraper;
pub use popups::DismissalOutcome;
pub use reveal::{ActivationOutcome, RevealState};
