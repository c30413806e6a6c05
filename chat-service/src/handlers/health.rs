use crate::dtos::StatusResponse;
use crate::startup::AppState;
use axum::extract::State;
use service_core::error::AppError;
use service_core::response::ApiJson;

/// Readiness only; storage health is not checked.
pub async fn healthz(State(state): State<AppState>) -> Result<ApiJson<StatusResponse>, AppError> {
    if state.readiness.is_ready() {
        Ok(ApiJson(StatusResponse {
            status: "OK".to_string(),
        }))
    } else {
        Err(AppError::ServiceUnavailable(anyhow::anyhow!("Unhealthy")))
    }
}
