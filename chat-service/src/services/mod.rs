//! Services module for chat-service.

pub mod database;
pub mod metrics;
pub mod store;

pub use self::database::Database;
pub use self::metrics::{get_metrics, init_metrics};
pub use self::store::MessageStore;
