use crate::pdf::errors::PdfError;
use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{info, instrument};

const USER_AGENT: &str = "Glean/0.1";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(60))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to build HTTP client")
});

/// Download `url` as raw bytes. The content type is not inspected.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_pdf(url: &str) -> Result<Bytes, PdfError> {
    let parsed_url = url::Url::parse(url)?;

    info!("Fetching PDF");
    let response = HTTP_CLIENT
        .get(parsed_url)
        .send()
        .await
        .map_err(PdfError::from_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PdfError::Http { status });
    }

    response.bytes().await.map_err(PdfError::from_reqwest_error)
}

/// Decode the text layer of a PDF held in memory.
///
/// Decoding is CPU-bound and the decoder can panic on hostile input, so it
/// runs on the blocking pool where a panic surfaces as a join error.
pub async fn decode_pdf(buffer: Bytes) -> Result<String, PdfError> {
    info!("Parsing PDF content ({} bytes)", buffer.len());
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&buffer))
        .await
        .map_err(|e| PdfError::Decode(e.to_string()))?
        .map_err(|e| PdfError::Decode(e.to_string()))
}

/// Fetch then decode.
pub async fn parse_pdf(url: &str) -> Result<String, PdfError> {
    let buffer = fetch_pdf(url).await?;
    decode_pdf(buffer).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_fails_before_request() {
        let result = fetch_pdf("not a url").await;
        assert!(matches!(result, Err(PdfError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_decode_rejects_non_pdf_bytes() {
        let result = decode_pdf(Bytes::from_static(b"<html>not a pdf</html>")).await;
        assert!(matches!(result, Err(PdfError::Decode(_))));
    }

    #[tokio::test]
    async fn test_decode_rejects_empty_buffer() {
        let result = decode_pdf(Bytes::new()).await;
        assert!(matches!(result, Err(PdfError::Decode(_))));
    }
}
