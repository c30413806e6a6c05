use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serialize `payload` into a response carrying the UTF-8 JSON content type.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    let content_type = [(
        header::CONTENT_TYPE,
        HeaderValue::from_static(JSON_CONTENT_TYPE),
    )];

    match serde_json::to_vec(payload) {
        Ok(body) => (status, content_type, body).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                content_type,
                r#"{"error":"Internal server error"}"#,
            )
                .into_response()
        }
    }
}

/// 200 OK JSON body. Use instead of `axum::Json`, which omits the charset.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        json_response(StatusCode::OK, &self.0)
    }
}
