pub mod access_log;
pub mod metrics;
pub mod security_headers;
pub mod tracing;

pub use self::access_log::access_log_middleware;
pub use self::metrics::metrics_middleware;
pub use self::security_headers::security_headers_middleware;
pub use self::tracing::{
    request_id_middleware, RequestId, RequestIdGenerator, REQUEST_ID_HEADER,
};
