use crate::models::Conversation;
use crate::startup::AppState;
use anyhow::Context;
use axum::extract::{Path, State};
use service_core::error::AppError;
use service_core::response::ApiJson;
use std::collections::HashMap;

/// `GET /conversations/:id`: every message stored under `id`.
///
/// Also mounted at `/conversations/:id/*rest`; anything after the id is
/// ignored. A missing, non-integer or non-positive id is a 404.
pub async fn get_conversation(
    State(state): State<AppState>,
    params: Option<Path<HashMap<String, String>>>,
) -> Result<ApiJson<Conversation>, AppError> {
    let raw_id = params
        .as_ref()
        .and_then(|Path(params)| params.get("id"))
        .map(String::as_str);

    let id = parse_conversation_id(raw_id)
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Invalid conversation ID")))?;

    let messages = state
        .store
        .messages_by_conversation(id)
        .await
        .context("Failed to retrieve conversation")?;

    Ok(ApiJson(Conversation::new(id, messages)))
}

pub fn parse_conversation_id(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.parse::<i32>().ok()).filter(|id| *id >= 1)
}
