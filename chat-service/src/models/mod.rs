pub mod message;

pub use message::{Conversation, Message, NewMessage};
