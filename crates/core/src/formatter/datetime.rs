//! RFC 2822 and ISO 8601 date formatting.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::constants::{ISO8601_PARSE_PATTERN, ISO8601_PATTERN, RFC2822_PATTERN};

/// Formats `date` as `Day, DD Mon YYYY HH:MM:SS +ZZZZ` in its own offset.
pub fn to_rfc2822<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format(RFC2822_PATTERN).to_string()
}

/// Parses an RFC 2822 date; returns `None` if `source` does not match the format.
pub fn from_rfc2822(source: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(source.trim(), RFC2822_PATTERN).ok()
}

/// Formats `date` in UTC as `YYYY-MM-DDTHH:MM:SS+00:00`.
pub fn to_iso8601<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.with_timezone(&Utc).format(ISO8601_PATTERN).to_string()
}

/// Parses an ISO 8601 date with either a `Z` suffix or a `±HH:MM` offset.
pub fn from_iso8601(source: &str) -> Option<DateTime<Utc>> {
    let source = source.trim();
    if let Some(naive) = source.strip_suffix(['Z', 'z']) {
        return NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|n| n.and_utc());
    }
    DateTime::parse_from_str(source, ISO8601_PARSE_PATTERN)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_rfc2822_format() {
        assert_eq!(to_rfc2822(&sample()), "Sat, 09 Mar 2024 14:05:07 +0000");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = sample().with_timezone(&offset);
        assert_eq!(to_rfc2822(&local), "Sat, 09 Mar 2024 16:05:07 +0200");
    }

    #[test]
    fn test_rfc2822_parse() {
        let parsed = from_rfc2822("Sat, 09 Mar 2024 16:05:07 +0200").unwrap();
        assert_eq!(parsed.with_timezone(&Utc), sample());
        assert!(from_rfc2822("09/03/2024").is_none());
    }

    #[test]
    fn test_iso8601_emits_explicit_offset() {
        assert_eq!(to_iso8601(&sample()), "2024-03-09T14:05:07+00:00");

        let offset = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            to_iso8601(&sample().with_timezone(&offset)),
            "2024-03-09T14:05:07+00:00"
        );
    }

    #[test]
    fn test_iso8601_parse_accepts_z_and_offset() {
        assert_eq!(from_iso8601("2024-03-09T14:05:07Z"), Some(sample()));
        assert_eq!(from_iso8601("2024-03-09T14:05:07+00:00"), Some(sample()));
        assert_eq!(from_iso8601("2024-03-09T11:05:07-03:00"), Some(sample()));
        assert_eq!(from_iso8601("2024-03-09 14:05:07"), None);
    }
}
