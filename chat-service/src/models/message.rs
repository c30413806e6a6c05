//! Message model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored message as returned when reading a conversation.
///
/// The row id and `conversation_id` are not part of the projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub sender: String,
    pub message: String,
    pub created: NaiveDateTime,
}

/// Input for appending a message. `created` and `id` are assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender: String,
    pub conversation_id: i32,
    pub message: String,
}

/// Response-only view over every message sharing a conversation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i32,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(id: i32, messages: Vec<Message>) -> Self {
        Self { id, messages }
    }
}
