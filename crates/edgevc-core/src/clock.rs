//! # Clocks
//!
//! The issuance pipeline reads "now" through the [`Clock`] trait rather than
//! calling `Utc::now()` itself, so tests can pin or step time.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::temporal::Timestamp;

/// Source of the current instant.
///
/// Implementations must be safe to share across concurrently running
/// request handlers.
pub trait Clock: Send + Sync {
    /// The current instant, truncated to seconds.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that reports a caller-controlled instant.
///
/// Stored as epoch seconds in an atomic so [`FixedClock::set`] and
/// [`FixedClock::advance`] work through a shared reference.
pub struct FixedClock {
    epoch_secs: AtomicI64,
}

impl FixedClock {
    /// Pin the clock at `at`.
    pub fn new(at: Timestamp) -> Self {
        Self {
            epoch_secs: AtomicI64::new(at.epoch_secs()),
        }
    }

    /// Move the clock to `at`.
    pub fn set(&self, at: Timestamp) {
        self.epoch_secs.store(at.epoch_secs(), Ordering::SeqCst);
    }

    /// Step the clock by `secs` seconds (may be negative).
    pub fn advance(&self, secs: i64) {
        self.epoch_secs.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let secs = self.epoch_secs.load(Ordering::SeqCst);
        // Only values produced from a valid Timestamp are ever stored, barring
        // an `advance` past chrono's range; fall back to wall time there.
        Timestamp::from_epoch_secs(secs).unwrap_or_else(|_| Timestamp::now())
    }
}

impl fmt::Debug for FixedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedClock").field("now", &self.now()).finish()
    }
}
