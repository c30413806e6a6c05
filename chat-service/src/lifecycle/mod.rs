//! Process lifecycle: readiness flag, lifecycle states, termination signals.
//!
//! ```text
//! starting ──bind + schema──▶ ready ──SIGINT/SIGTERM──▶ draining ──drained or grace elapsed──▶ stopped
//! ```

pub mod readiness;
pub mod signals;

pub use readiness::{Lifecycle, LifecycleState, Readiness};
pub use signals::shutdown_signal;
