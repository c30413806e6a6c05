use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use service_core::error::{AppError, ErrorResponse};
use service_core::response::json_response;
use std::any::Any;

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}

pub async fn only_post_allowed() -> impl IntoResponse {
    (
        [(header::ALLOW, "POST")],
        AppError::MethodNotAllowed(anyhow::anyhow!("Only POST is allowed")),
    )
}

pub async fn only_get_allowed() -> impl IntoResponse {
    (
        [(header::ALLOW, "GET, HEAD")],
        AppError::MethodNotAllowed(anyhow::anyhow!("Only GET is allowed")),
    )
}

/// Turns a handler panic into a JSON 500 so the request still completes.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(anyhow::anyhow!("{}", detail).context("Internal server error"))
        .into_response()
}

/// Gives the bare 408 produced by the write timeout a JSON error body.
pub async fn timeout_as_json(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        tracing::warn!(status = 408, "Request exceeded the write timeout");
        return json_response(
            StatusCode::REQUEST_TIMEOUT,
            &ErrorResponse {
                error: "Request timed out".to_string(),
            },
        );
    }

    response
}
