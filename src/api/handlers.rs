use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    api::dtos::{ErrorResponse, ParsePdfRequest, ScrapeRequest, ScrapeResponse},
    app_state::AppState,
    pdf,
};

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Drive a remote browser over `url` and return the extracted text.
#[utoipa::path(
    post,
    path = "/api/scrape",
    tag = "scrape",
    request_body = ScrapeRequest,
    responses(
        (status = 200, description = "Extracted text", body = ScrapeResponse),
        (status = 400, description = "Missing url or unknown category", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Session, navigation or extraction failure", body = ErrorResponse)
    )
)]
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let (url, category) = match payload.validate() {
        Ok(valid) => valid,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error),
    };

    match state.scraper.scrape(url, category).await {
        Ok(result) => {
            info!("Scraped {} characters from {}", result.text.len(), url);
            (
                StatusCode::OK,
                Json(ScrapeResponse {
                    scraped_content: result.text,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to scrape {}: {}", url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Download a PDF and return its text layer.
#[utoipa::path(
    post,
    path = "/api/parse-pdf",
    tag = "pdf",
    request_body = ParsePdfRequest,
    responses(
        (status = 200, description = "Decoded text", body = ScrapeResponse),
        (status = 400, description = "Missing url", body = ErrorResponse),
        (status = 405, description = "Method not allowed", body = ErrorResponse),
        (status = 500, description = "Fetch or decode failure", body = ErrorResponse)
    )
)]
pub async fn parse_pdf(payload: Result<Json<ParsePdfRequest>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };
    let url = match payload.validate() {
        Ok(url) => url,
        Err(error) => return error_response(StatusCode::BAD_REQUEST, error),
    };

    match pdf::parse_pdf(url).await {
        Ok(text) => (
            StatusCode::OK,
            Json(ScrapeResponse {
                scraped_content: text,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to parse PDF from {}: {}", url, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::router,
        browser::session::MockSessionFactory,
        config::Config,
    };
    use axum::{
        body::Body,
        http::{Method, Request},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_without_sessions() -> axum::Router {
        let mut factory = MockSessionFactory::new();
        factory.expect_create().never();
        router(AppState::with_sessions(Arc::new(factory), Config::default()))
    }

    async fn error_body(response: Response) -> ErrorResponse {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_rejects_other_methods() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let request = Request::builder()
                .method(method)
                .uri("/api/scrape")
                .body(Body::empty())
                .unwrap();

            let response = app_without_sessions().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(error_body(response).await.error, "Method Not Allowed");
        }
    }

    #[tokio::test]
    async fn test_scrape_missing_url() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scrape")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "category": "Article" }).to_string(),
            ))
            .unwrap();

        let response = app_without_sessions().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error_body(response).await.error,
            "URL is required in the request body."
        );
    }

    #[tokio::test]
    async fn test_scrape_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scrape")
            .header("content-type", "application/json")
            .body(Body::from("{\"url\": "))
            .unwrap();

        let response = app_without_sessions().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scrape_unknown_category() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/scrape")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "url": "https://example.com", "category": "Blog" })
                    .to_string(),
            ))
            .unwrap();

        let response = app_without_sessions().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_pdf_rejects_get() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/parse-pdf")
            .body(Body::empty())
            .unwrap();

        let response = app_without_sessions().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_parse_pdf_missing_url() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/parse-pdf")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app_without_sessions().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await.error, "URL is required.");
    }
}
