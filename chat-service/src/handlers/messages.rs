use crate::dtos::{MessageResponse, PostMessageRequest};
use crate::models::NewMessage;
use crate::services::metrics::record_message_posted;
use crate::startup::AppState;
use crate::utils::ValidatedJson;
use anyhow::Context;
use axum::extract::State;
use service_core::error::AppError;
use service_core::response::ApiJson;

/// `POST /messages/`: append one message to a conversation.
pub async fn post_message(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PostMessageRequest>,
) -> Result<ApiJson<MessageResponse>, AppError> {
    let message = NewMessage::try_from(req)?;

    state
        .store
        .insert_message(&message)
        .await
        .context("Failed to post message")?;

    record_message_posted();
    tracing::debug!(
        conversation_id = message.conversation_id,
        "Message posted"
    );

    Ok(ApiJson(MessageResponse {
        message: "Message posted".to_string(),
    }))
}
