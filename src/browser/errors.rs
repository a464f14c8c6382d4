use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("session request failed: {0}")]
    Http(String),

    #[error("session api error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected session response: {0}")]
    Protocol(String),

    #[error("session is not initialized")]
    NotInitialized,

    #[error("action timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl BrowserError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Protocol(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}
