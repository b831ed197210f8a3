pub mod dtos;
pub mod handlers;

use axum::{
    Json, Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{app_state::AppState, health};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        handlers::detect,
        handlers::extract,
        handlers::classify,
    ),
    components(schemas(
        dtos::UrlRequest,
        dtos::ClassifyRequest,
        dtos::DetectResponse,
        dtos::ExtractResponse,
        dtos::ClassifyResponse,
        dtos::ErrorResponse,
        health::HealthResponse,
        crate::extractor::LinkInfo,
        crate::extractor::LinkType,
        crate::classifier::ClassificationResult,
        crate::classifier::ContentCategory,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "links", description = "Link type detection and content extraction"),
        (name = "content", description = "Classification of extracted text")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/detect", post(handlers::detect))
        .route("/api/extract", post(handlers::extract))
        .route("/api/classify", post(handlers::classify))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}
