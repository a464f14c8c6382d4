use thiserror::Error;

use crate::browser::BrowserError;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Session(#[from] BrowserError),

    #[error("extraction resulted in empty content")]
    EmptyExtraction,
}
