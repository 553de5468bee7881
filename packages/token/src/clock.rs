//! Time sources for expiry resolution and validation.
//!
//! The codec never reads the wall clock directly. Every "now" goes through a
//! [`Clock`] handed in with the call options, so simulated time stays local
//! to the caller that installed it.

use arc_swap::ArcSwap;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

/// Source of the current instant.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Wall clock. Used when no clock option is supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Simulated clock that only moves when told to.
///
/// Shared through an `Arc`, so a test can keep a handle, pass a clone into
/// the codec options and advance time between calls.
#[derive(Debug)]
pub struct ManualClock {
    now: ArcSwap<DateTime<Utc>>,
}

impl ManualClock {
    /// Clock frozen at `start`
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: ArcSwap::from_pointee(start),
        }
    }

    /// Clock frozen at `secs` seconds since the Unix epoch.
    ///
    /// Out-of-range values clamp to the epoch.
    #[must_use]
    pub fn at_unix(secs: i64) -> Self {
        Self::new(DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH))
    }

    /// Jump to an absolute instant
    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.store(Arc::new(instant));
    }

    /// Move forward (or backward, for negative `by`). Saturates at the
    /// representable range.
    pub fn advance(&self, by: Duration) {
        self.now.rcu(|current| {
            let next = current.checked_add_signed(by).unwrap_or(if by < Duration::zero() {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            });
            Arc::new(next)
        });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        **self.now.load()
    }
}
