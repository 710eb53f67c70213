//! Time sources for the logger.
//!
//! Every time-dependent decision goes through a [`Clock`], so the whole
//! pipeline can run against simulated time:
//! - [`SystemClock`]: tokio's monotonic clock, chrono's UTC wall clock and
//!   `tokio::time::sleep`.
//! - [`ManualClock`]: a deterministic clock whose `sleep` advances time
//!   instantly. Cloned handles share the same timeline.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// A source of monotonic time, wall-clock time and delays.
pub trait Clock {
    /// Monotonic time used for interval arithmetic.
    fn now(&self) -> Instant;

    /// Wall-clock time used for capture timestamps and file names.
    fn utc_now(&self) -> DateTime<Utc>;

    /// Suspend the caller for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

// ---------------------------------------------------------------------------
// SystemClock
// ---------------------------------------------------------------------------

/// The real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// A simulated clock that only moves when told to.
///
/// Both the monotonic and the wall-clock readings are derived from one
/// shared offset, so they always advance together.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    origin_utc: DateTime<Utc>,
    /// Nanoseconds elapsed since `origin`.
    elapsed: Arc<AtomicU64>,
    /// Nanoseconds spent in [`Clock::sleep`].
    slept: Arc<AtomicU64>,
}

impl ManualClock {
    /// Start a simulated timeline at `origin_utc`.
    pub fn new(origin_utc: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            origin_utc,
            elapsed: Arc::new(AtomicU64::new(0)),
            slept: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Move time forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.elapsed.fetch_add(as_nanos(by), Ordering::SeqCst);
    }

    /// Total simulated time since construction.
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed.load(Ordering::SeqCst))
    }

    /// Total time spent in `sleep` since construction.
    pub fn slept(&self) -> Duration {
        Duration::from_nanos(self.slept.load(Ordering::SeqCst))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        let nanos = self.elapsed.load(Ordering::SeqCst);
        self.origin_utc + chrono::Duration::nanoseconds(i64::try_from(nanos).unwrap_or(i64::MAX))
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.slept.fetch_add(as_nanos(duration), Ordering::SeqCst);
        self.advance(duration);
        tokio::task::yield_now()
    }
}

fn as_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
