//! Periodic accepted/rejected summaries.
//!
//! [`StatsReporter`] is sampled once per received chunk rather than driven by
//! its own timer. When more than the reporting interval has passed since the
//! last summary it logs the counts and starts a fresh window. File rotation
//! never touches the counters.

use std::time::Duration;

use tokio::time::Instant;

/// Sentence counts for one reporting window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionCounters {
    /// Sentences that passed the checksum and were written.
    pub ok: u64,
    /// Sentences rejected by the checksum.
    pub rejected: u64,
}

#[derive(Debug)]
pub struct StatsReporter {
    counters: SessionCounters,
    interval: Duration,
    window_start: Instant,
    last_reported: Option<SessionCounters>,
}

impl StatsReporter {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            counters: SessionCounters::default(),
            interval,
            window_start: now,
            last_reported: None,
        }
    }

    pub fn record_ok(&mut self) {
        self.counters.ok += 1;
    }

    pub fn record_rejected(&mut self) {
        self.counters.rejected += 1;
    }

    /// Counts accumulated since the last report.
    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Emit a summary if the interval has been exceeded.
    ///
    /// Returns the reported counts; the internal counters and the window
    /// start are reset at the same time.
    pub fn maybe_report(&mut self, now: Instant) -> Option<SessionCounters> {
        if now.saturating_duration_since(self.window_start) <= self.interval {
            return None;
        }

        let report = std::mem::take(&mut self.counters);
        log::info!(
            "{} NMEA sentences logged, {} skipped.",
            report.ok,
            report.rejected
        );
        self.window_start = now;
        self.last_reported = Some(report);
        Some(report)
    }

    /// The most recent summary emitted, if any.
    pub fn last_reported(&self) -> Option<SessionCounters> {
        self.last_reported
    }
}
