use crate::models::{Message, NewMessage};
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence seam used by the HTTP handlers.
///
/// Implementations must be safe to call from many in-flight requests at once.
/// Each call is a single independent statement; there are no transactions.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append one message.
    async fn insert_message(&self, message: &NewMessage) -> Result<(), AppError>;

    /// Every message in a conversation, oldest first. Empty when none match.
    async fn messages_by_conversation(&self, conversation_id: i32)
        -> Result<Vec<Message>, AppError>;
}
