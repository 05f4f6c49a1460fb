use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Shared view of a tick source's liveness.
///
/// Clones observe and cancel the same source, so a host loop or a signal handler can stop a
/// scene it does not own.
#[derive(Clone, Debug)]
pub struct TickToken {
    active: Arc<AtomicBool>,
}

impl TickToken {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::Release);
    }
}

/// The scene's single owned tick source.
///
/// Dropping the handle cancels it, so replacing a handle always retires the previous one.
#[derive(Debug)]
pub struct TickHandle {
    interval: Duration,
    generation: u64,
    token: TickToken,
}

impl TickHandle {
    pub(crate) fn start(interval: Duration, generation: u64) -> Self {
        Self {
            interval,
            generation,
            token: TickToken {
                active: Arc::new(AtomicBool::new(true)),
            },
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Counts scene (re)generations; the first handle is generation 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_active(&self) -> bool {
        self.token.is_active()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> TickToken {
        self.token.clone()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
