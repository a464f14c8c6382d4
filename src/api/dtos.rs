use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scrape::Category;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScrapeRequest {
    pub url: Option<String>,
    /// `Website` or `Article`. Defaults to `Article` when absent or blank.
    pub category: Option<String>,
}

impl ScrapeRequest {
    pub fn validate(&self) -> Result<(&str, Category), String> {
        let url = match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.trim(),
            _ => return Err("URL is required in the request body.".to_string()),
        };
        let category = match self.category.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse()?,
            _ => Category::default(),
        };
        Ok((url, category))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ParsePdfRequest {
    pub url: Option<String>,
}

impl ParsePdfRequest {
    pub fn validate(&self) -> Result<&str, String> {
        match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => Ok(url.trim()),
            _ => Err("URL is required.".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeResponse {
    pub scraped_content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
