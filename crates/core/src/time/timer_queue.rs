use parking_lot::Mutex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::{Clock, SystemClock, TimeUnit};
use crate::constants::{TIMER_QUEUE_EMPTY, TIMER_QUEUE_EXPIRED};
use crate::{CoreError, CoreResult};

/// A scheduled entry: the requested delay, an optional payload and its absolute expiry.
#[derive(Debug, Clone)]
pub struct Timer<C> {
    delay_ms: i64,
    context: Option<C>,
    expiry_at_ms: i64,
}

impl<C> Timer<C> {
    pub fn delay_ms(&self) -> i64 {
        self.delay_ms
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    pub fn expiry_at_ms(&self) -> i64 {
        self.expiry_at_ms
    }
}

// Ordered on expiry only and reversed, so the std max-heap pops the earliest expiry.
impl<C> PartialEq for Timer<C> {
    fn eq(&self, other: &Self) -> bool {
        self.expiry_at_ms == other.expiry_at_ms
    }
}

impl<C> Eq for Timer<C> {}

impl<C> PartialOrd for Timer<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for Timer<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.expiry_at_ms.cmp(&self.expiry_at_ms)
    }
}

/// Thread-safe min-priority queue of timers keyed on absolute expiry.
///
/// Callers poll [`TimerQueue::first_delay`] to decide how long to sleep and call
/// [`TimerQueue::drain_expired`] to collect the payloads that are due.
pub struct TimerQueue<C, K = SystemClock> {
    timers: Mutex<BinaryHeap<Timer<C>>>,
    clock: K,
}

impl<C> TimerQueue<C> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, K: Clock> TimerQueue<C, K> {
    pub fn with_clock(clock: K) -> Self {
        Self {
            timers: Mutex::new(BinaryHeap::new()),
            clock,
        }
    }

    /// Schedules `context` to expire `delay` units from now.
    ///
    /// A `None` context still occupies the queue but is never returned by a drain.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `delay` is negative.
    pub fn add(&self, delay: i64, unit: TimeUnit, context: Option<C>) -> CoreResult<()> {
        if delay < 0 {
            return Err(CoreError::InvalidInput(
                "cannot add an expired time to the queue".into(),
            ));
        }
        let delay_ms = unit.to_millis(delay);
        let timer = Timer {
            delay_ms,
            context,
            expiry_at_ms: self.clock.now_millis().saturating_add(delay_ms),
        };
        tracing::trace!(delay_ms, expiry_at_ms = timer.expiry_at_ms, "timer added");
        self.timers.lock().push(timer);
        Ok(())
    }

    /// Milliseconds until the head timer expires.
    ///
    /// Returns [`TIMER_QUEUE_EMPTY`] (`0`) when the queue is empty and
    /// [`TIMER_QUEUE_EXPIRED`] (`-1`) when the head has already expired, so a caller can
    /// tell "nothing to wait for" from "drain now". Otherwise the result is at least `1`.
    pub fn first_delay(&self) -> i64 {
        let timers = self.timers.lock();
        match timers.peek() {
            None => TIMER_QUEUE_EMPTY,
            Some(head) => {
                let remaining = head.expiry_at_ms - self.clock.now_millis();
                if remaining > 0 {
                    remaining
                } else {
                    TIMER_QUEUE_EXPIRED
                }
            }
        }
    }

    /// Removes every timer whose expiry is at or before now and returns their contexts.
    ///
    /// Contexts come back in expiry order; entries without a context are dropped.
    pub fn drain_expired(&self) -> Vec<C> {
        let now = self.clock.now_millis();
        let mut timers = self.timers.lock();
        let mut expired = Vec::new();
        while timers.peek().is_some_and(|head| head.expiry_at_ms <= now) {
            if let Some(context) = timers.pop().and_then(|t| t.context) {
                expired.push(context);
            }
        }
        if !expired.is_empty() {
            tracing::trace!(count = expired.len(), "drained expired timers");
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.timers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.lock().is_empty()
    }
}
