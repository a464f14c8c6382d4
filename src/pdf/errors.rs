use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request timeout")]
    Timeout,

    #[error("request failed: {0}")]
    Fetch(String),

    #[error("request failed with status code {status}")]
    Http { status: reqwest::StatusCode },

    #[error("failed to parse pdf: {0}")]
    Decode(String),
}

impl PdfError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            Self::Fetch(err.to_string())
        }
    }
}
