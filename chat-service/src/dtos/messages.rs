use crate::models::NewMessage;
use serde::{Deserialize, Deserializer, Serialize};
use service_core::error::AppError;
use validator::Validate;

/// Body of `POST /messages/`.
///
/// A missing or `null` `conversation_id` decodes as 0 and fails validation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostMessageRequest {
    pub sender: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    #[validate(range(min = 1, max = 2147483647, message = "Invalid conversation ID"))]
    pub conversation_id: i64,
    pub message: String,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<PostMessageRequest> for NewMessage {
    type Error = AppError;

    fn try_from(req: PostMessageRequest) -> Result<Self, Self::Error> {
        let conversation_id = i32::try_from(req.conversation_id)
            .ok()
            .filter(|id| *id >= 1)
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Invalid conversation ID")))?;

        Ok(NewMessage {
            sender: req.sender,
            conversation_id,
            message: req.message,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
