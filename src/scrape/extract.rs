use tracing::info;

use crate::browser::BrowserSession;
use crate::scrape::errors::ScrapeError;

/// Text produced by a successful scrape. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub text: String,
}

impl ExtractionResult {
    /// A technically successful call that produced only whitespace is a failure.
    pub fn from_text(text: String) -> Result<Self, ScrapeError> {
        if text.trim().is_empty() {
            return Err(ScrapeError::EmptyExtraction);
        }
        Ok(Self { text })
    }
}

pub async fn extract_text(
    session: &mut dyn BrowserSession,
    instruction: &str,
) -> Result<ExtractionResult, ScrapeError> {
    info!("Extracting content");
    let text = session.extract(instruction).await?;
    info!("Extracted {} characters", text.len());
    ExtractionResult::from_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::session::MockBrowserSession;

    #[test]
    fn test_blank_text_is_rejected() {
        for text in ["", "   ", "\n\t \n"] {
            let err = ExtractionResult::from_text(text.to_string()).unwrap_err();
            assert!(matches!(err, ScrapeError::EmptyExtraction));
        }
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let result = ExtractionResult::from_text("  Title\n\nBody.\n".to_string()).unwrap();
        assert_eq!(result.text, "  Title\n\nBody.\n");
    }

    #[tokio::test]
    async fn test_extract_passes_instruction_once() {
        let mut session = MockBrowserSession::new();
        session
            .expect_extract()
            .withf(|instruction| instruction == "pull the article")
            .times(1)
            .returning(|_| Ok("Body".to_string()));

        let result = extract_text(&mut session, "pull the article").await.unwrap();
        assert_eq!(result.text, "Body");
    }
}
