//! Time units, clocks, a stopwatch and an expiry-ordered timer queue.

mod stopwatch;
mod timer_queue;

pub use stopwatch::StopWatch;
pub use timer_queue::{Timer, TimerQueue};

use std::time::Duration;

/// Granularity of a caller-supplied amount of time.
///
/// Conversions truncate toward zero, so `999` microseconds is `0` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    fn nanos_per_unit(self) -> i128 {
        match self {
            TimeUnit::Nanoseconds => 1,
            TimeUnit::Microseconds => 1_000,
            TimeUnit::Milliseconds => 1_000_000,
            TimeUnit::Seconds => 1_000_000_000,
            TimeUnit::Minutes => 60 * 1_000_000_000,
            TimeUnit::Hours => 3_600 * 1_000_000_000,
            TimeUnit::Days => 86_400 * 1_000_000_000,
        }
    }

    /// Converts `amount` of this unit to whole milliseconds, saturating at the `i64` range.
    pub fn to_millis(self, amount: i64) -> i64 {
        let millis = i128::from(amount) * self.nanos_per_unit() / 1_000_000;
        millis.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Converts a non-negative `amount` of this unit to a [`Duration`].
    ///
    /// Returns `None` for negative amounts.
    pub fn to_duration(self, amount: i64) -> Option<Duration> {
        let amount = u64::try_from(amount).ok()?;
        Some(match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(amount),
            TimeUnit::Microseconds => Duration::from_micros(amount),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(amount.saturating_mul(3_600)),
            TimeUnit::Days => Duration::from_secs(amount.saturating_mul(86_400)),
        })
    }

    /// Expresses `duration` in this unit, truncating and saturating at `i64::MAX`.
    pub fn convert(self, duration: Duration) -> i64 {
        let amount = duration.as_nanos() as i128 / self.nanos_per_unit();
        amount.min(i128::from(i64::MAX)) as i64
    }
}

/// Source of wall-clock time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}
