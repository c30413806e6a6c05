pub mod conversations;
pub mod fallback;
pub mod health;
pub mod messages;
pub mod metrics;

pub use self::conversations::get_conversation;
pub use self::fallback::{
    not_found, only_get_allowed, only_post_allowed, panic_response, timeout_as_json,
};
pub use self::health::healthz;
pub use self::messages::post_message;
