use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    Ready,
    Draining,
    Stopped,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Starting => "starting",
            LifecycleState::Ready => "ready",
            LifecycleState::Draining => "draining",
            LifecycleState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks the server's current `LifecycleState` and logs every transition.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: Arc<Mutex<LifecycleState>>,
}

impl Lifecycle {
    /// A new tracker starts in `Starting`.
    pub fn new() -> Self {
        tracing::info!(state = %LifecycleState::Starting, "Server is starting");
        Self {
            state: Arc::new(Mutex::new(LifecycleState::Starting)),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `next` and return the previous state.
    pub fn transition(&self, next: LifecycleState) -> LifecycleState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *state, next);
        tracing::info!(from = %previous, to = %next, "Lifecycle transition");
        previous
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide readiness flag shared by the lifecycle controller and the
/// health endpoint. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct Readiness {
    ready: Arc<AtomicBool>,
}

impl Readiness {
    /// A new flag starts not ready.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
        tracing::info!(state = %LifecycleState::Ready, "Readiness flag set");
    }

    pub fn mark_draining(&self) {
        self.ready.store(false, Ordering::SeqCst);
        tracing::info!(state = %LifecycleState::Draining, "Readiness flag cleared");
    }
}
