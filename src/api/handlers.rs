use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use crate::{
    api::dtos::{
        ClassifyRequest, ClassifyResponse, DetectResponse, ErrorResponse, ExtractResponse,
        UrlRequest,
    },
    app_state::AppState,
    detector::{self, DetectError},
    extractor::{DispatchError, LinkInfo},
};

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error))).into_response()
}

fn invalid_url(err: &DetectError) -> String {
    match err {
        DetectError::InvalidUrl(source) => format!("invalid URL: {source}"),
    }
}

#[utoipa::path(
    post,
    path = "/api/detect",
    tag = "links",
    request_body = UrlRequest,
    responses(
        (status = 200, description = "Link type detected", body = DetectResponse),
        (status = 400, description = "Missing or malformed URL", body = ErrorResponse)
    )
)]
pub async fn detect(payload: Result<Json<UrlRequest>, JsonRejection>) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(handler = "detect", error = %rejection, "invalid request body");
            return error_response(StatusCode::BAD_REQUEST, "invalid request body");
        }
    };
    if let Err(error) = request.validate() {
        warn!(handler = "detect", "{error}");
        return error_response(StatusCode::BAD_REQUEST, error);
    }

    match detector::detect(&request.url) {
        Ok(link_type) => {
            debug!(handler = "detect", url = %request.url, %link_type, "detected link type");
            Json(DetectResponse {
                link_info: LinkInfo::new(request.url, link_type),
            })
            .into_response()
        }
        Err(e) => {
            warn!(handler = "detect", url = %request.url, error = %e, "invalid URL");
            error_response(StatusCode::BAD_REQUEST, invalid_url(&e))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/extract",
    tag = "links",
    request_body = UrlRequest,
    responses(
        (status = 200, description = "Content extracted", body = ExtractResponse),
        (status = 400, description = "Missing or malformed URL", body = ErrorResponse),
        (status = 500, description = "Extraction failed", body = ErrorResponse),
        (status = 503, description = "Server is shutting down", body = ErrorResponse)
    )
)]
pub async fn extract(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(handler = "extract", error = %rejection, "invalid request body");
            return error_response(StatusCode::BAD_REQUEST, "invalid request body");
        }
    };
    if let Err(error) = request.validate() {
        warn!(handler = "extract", "{error}");
        return error_response(StatusCode::BAD_REQUEST, error);
    }

    match state
        .registry
        .extract_with_cancel(&request.url, &state.shutdown)
        .await
    {
        Ok(extracted) => {
            debug!(
                handler = "extract",
                url = %request.url,
                link_type = %extracted.link_info.link_type,
                content_len = extracted.content.len(),
                "extracted content"
            );
            Json(ExtractResponse {
                link_info: extracted.link_info,
                content: extracted.content,
            })
            .into_response()
        }
        Err(DispatchError::Detect(e)) => {
            warn!(handler = "extract", url = %request.url, error = %e, "invalid URL");
            error_response(StatusCode::BAD_REQUEST, invalid_url(&e))
        }
        Err(DispatchError::Extract(e)) => {
            error!(
                handler = "extract",
                url = %request.url,
                kind = ?e.kind(),
                error = %e,
                "extraction failed"
            );
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("extraction failed: {e}"),
            )
        }
        Err(DispatchError::Cancelled) => {
            warn!(handler = "extract", url = %request.url, "extraction cancelled by shutdown");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "extraction cancelled")
        }
    }
}

/// Classify extracted text into a content category.
///
/// Needs a completion backend installed through `AppState::with_classifier`.
/// The `api` binary starts without one, so there this route answers 503.
#[utoipa::path(
    post,
    path = "/api/classify",
    tag = "content",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Content classified", body = ClassifyResponse),
        (status = 400, description = "Missing content", body = ErrorResponse),
        (status = 500, description = "Classification failed", body = ErrorResponse),
        (status = 503, description = "No completion backend configured (the default for the api binary)", body = ErrorResponse)
    )
)]
pub async fn classify(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(handler = "classify", error = %rejection, "invalid request body");
            return error_response(StatusCode::BAD_REQUEST, "invalid request body");
        }
    };
    if let Err(error) = request.validate() {
        warn!(handler = "classify", "{error}");
        return error_response(StatusCode::BAD_REQUEST, error);
    }

    let Some(classifier) = state.classifier.as_ref() else {
        warn!(handler = "classify", "no classifier configured");
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "classifier not configured");
    };

    match classifier.classify(&request.content).await {
        Ok(classification) => {
            debug!(
                handler = "classify",
                primary = %classification.primary,
                confidence = classification.confidence,
                "classified content"
            );
            Json(ClassifyResponse { classification }).into_response()
        }
        Err(e) => {
            error!(handler = "classify", error = %e, "classification failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("classification failed: {e}"),
            )
        }
    }
}
