//! Constants used throughout the toolbox core crate.

/// Delimiters used to split list-typed properties when a descriptor names none.
pub const DEFAULT_DELIMITERS: &str = " ,;:\n";

/// Value returned by `TimerQueue::first_delay` when the queue holds no timers.
pub const TIMER_QUEUE_EMPTY: i64 = 0;

/// Value returned by `TimerQueue::first_delay` when the head timer has already expired.
pub const TIMER_QUEUE_EXPIRED: i64 = -1;

/// Tokens read as `true` by the boolean formatter (case-insensitive).
pub const TRUE_TOKENS: &[&str] = &["true", "yes", "on"];

/// Tokens read as `false` by the boolean formatter (case-insensitive).
pub const FALSE_TOKENS: &[&str] = &["false", "no", "off"];

/// `strftime` pattern for RFC 2822 dates.
pub const RFC2822_PATTERN: &str = "%a, %d %b %Y %H:%M:%S %z";

/// `strftime` pattern for ISO 8601 dates as emitted (always UTC, explicit `+00:00`).
pub const ISO8601_PATTERN: &str = "%Y-%m-%dT%H:%M:%S+00:00";

/// `strftime` pattern for ISO 8601 dates as parsed.
pub const ISO8601_PARSE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%:z";
