use std::fmt;
use std::time::{Duration, Instant};

use super::TimeUnit;
use crate::{CoreError, CoreResult};

/// Measures elapsed time on the monotonic clock.
///
/// A stopwatch is either idle (never started or reset), running, or stopped with a frozen
/// reading. Reading an idle stopwatch is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopWatch {
    start: Option<Instant>,
    stop: Option<Instant>,
}

impl StopWatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stopwatch that is already running from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `start` lies in the future.
    pub fn started_at(start: Instant) -> CoreResult<Self> {
        let mut watch = Self::new();
        watch.start_at(start)?;
        Ok(watch)
    }

    pub fn reset(&mut self) -> &mut Self {
        self.start = None;
        self.stop = None;
        self
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some() && self.stop.is_none()
    }

    /// Starts counting from now.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if already running.
    pub fn start(&mut self) -> CoreResult<&mut Self> {
        self.start_at(Instant::now())
    }

    /// Starts counting from an earlier instant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if already running, or
    /// [`CoreError::InvalidInput`] if `start` lies in the future.
    pub fn start_at(&mut self, start: Instant) -> CoreResult<&mut Self> {
        if self.is_running() {
            return Err(CoreError::InvalidState("stopwatch already running".into()));
        }
        if start > Instant::now() {
            return Err(CoreError::InvalidInput(
                "stopwatch cannot count from a future time".into(),
            ));
        }
        self.start = Some(start);
        self.stop = None;
        Ok(self)
    }

    /// Freezes the reading.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if not running.
    pub fn stop(&mut self) -> CoreResult<&mut Self> {
        // Sample first so bookkeeping is not measured.
        let now = Instant::now();
        if !self.is_running() {
            return Err(CoreError::InvalidState("stopwatch is not running".into()));
        }
        self.stop = Some(now);
        Ok(self)
    }

    /// Time since start while running, or between start and stop once stopped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidState`] if the stopwatch was never started.
    pub fn elapsed(&self) -> CoreResult<Duration> {
        let now = Instant::now();
        match (self.start, self.stop) {
            (Some(start), None) => Ok(now.saturating_duration_since(start)),
            (Some(start), Some(stop)) => Ok(stop.saturating_duration_since(start)),
            _ => Err(CoreError::InvalidState("stopwatch is not running".into())),
        }
    }

    pub fn elapsed_millis(&self) -> CoreResult<i64> {
        self.elapsed_in(TimeUnit::Milliseconds)
    }

    pub fn elapsed_in(&self, unit: TimeUnit) -> CoreResult<i64> {
        self.elapsed().map(|d| unit.convert(d))
    }
}

impl fmt::Display for StopWatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.elapsed_millis() {
            Ok(millis) => write!(f, "{millis}"),
            Err(_) => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_stopwatch_has_no_reading() {
        let watch = StopWatch::new();
        assert!(matches!(watch.elapsed(), Err(CoreError::InvalidState(_))));
        assert_eq!(watch.to_string(), "-");
    }

    #[test]
    fn test_start_twice_fails() {
        let mut watch = StopWatch::new();
        watch.start().unwrap();
        assert!(matches!(watch.start(), Err(CoreError::InvalidState(_))));
    }

    #[test]
    fn test_stop_freezes_reading() {
        let earlier = Instant::now() - Duration::from_millis(50);
        let mut watch = StopWatch::started_at(earlier).unwrap();
        watch.stop().unwrap();

        let first = watch.elapsed().unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(watch.elapsed().unwrap(), first);
        assert!(watch.elapsed_millis().unwrap() >= 50);
    }

    #[test]
    fn test_stop_when_idle_fails() {
        let mut watch = StopWatch::new();
        assert!(watch.stop().is_err());
    }

    #[test]
    fn test_future_start_rejected() {
        let future = Instant::now() + Duration::from_secs(60);
        assert!(matches!(
            StopWatch::started_at(future),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reset_and_restart() {
        let mut watch = StopWatch::new();
        watch.start().unwrap().stop().unwrap();
        watch.reset();
        assert!(!watch.is_running());
        assert!(watch.elapsed().is_err());
        watch.start().unwrap();
        assert!(watch.is_running());
    }
}
