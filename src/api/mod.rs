pub mod dtos;
pub mod handlers;

use axum::{
    Json, Router,
    body::Body,
    http::Request,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{Span, info_span};
use utoipa::OpenApi;

use crate::{app_state::AppState, health};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::scrape, handlers::parse_pdf, health::health_check),
    components(schemas(
        dtos::ScrapeRequest,
        dtos::ParsePdfRequest,
        dtos::ScrapeResponse,
        dtos::ErrorResponse,
        health::HealthResponse
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The id set by `SetRequestIdLayer` is recorded here, so every scrape log
/// line nested under this span carries it.
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/scrape",
            post(handlers::scrape).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/parse-pdf",
            post(handlers::parse_pdf).fallback(handlers::method_not_allowed),
        )
        .route("/healthz", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
