pub mod messages;

pub use messages::{MessageResponse, PostMessageRequest, StatusResponse};
