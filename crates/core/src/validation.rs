//! Input validation predicates.
//!
//! These are cheap syntactic checks intended for pre-validation before a value is parsed
//! or stored. None of them allocate beyond what the underlying parser needs.

use crate::formatter::{boolean, datetime};
use crate::settings::NamedEnum;

/// Returns true if `value` parses as a 32-bit signed integer.
pub fn is_integer(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

/// Returns true if `value` parses as a 64-bit signed integer.
pub fn is_long(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

/// Returns true if `value` contains at least one non-whitespace character.
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns true if `value` is non-blank and contains only ASCII word characters
/// (`0-9`, `a-z`, `A-Z`, `_`).
pub fn is_alphanumeric(value: &str) -> bool {
    is_valid_string(value)
        && value
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'_'))
}

/// Returns true if `value` is one of `true/false/yes/no/on/off`, ignoring case.
pub fn is_boolean(value: &str) -> bool {
    boolean::parse(value).is_some()
}

/// Returns true if `name` matches a member of `E`, ignoring case.
pub fn is_member<E: NamedEnum>(name: &str) -> bool {
    E::from_name(name).is_some()
}

/// Returns true if `value` is a parseable ISO 8601 date.
pub fn is_valid_iso8601(value: &str) -> bool {
    datetime::from_iso8601(value).is_some()
}

/// Returns true if `value` is a non-negative epoch-millisecond timestamp.
pub fn is_valid_millis(value: &str) -> bool {
    matches!(value.parse::<i64>(), Ok(millis) if millis >= 0)
}

/// Returns true if `value` is an epoch-millisecond timestamp later than now.
pub fn is_future_millis(value: &str) -> bool {
    matches!(
        value.parse::<i64>(),
        Ok(millis) if millis >= 0 && millis > chrono::Utc::now().timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Colour {
        Red,
        Green,
    }

    impl NamedEnum for Colour {
        fn variants() -> &'static [Self] {
            &[Colour::Red, Colour::Green]
        }

        fn name(&self) -> &'static str {
            match self {
                Colour::Red => "RED",
                Colour::Green => "GREEN",
            }
        }
    }

    #[test]
    fn test_numbers() {
        assert!(is_integer("-2147483648"));
        assert!(!is_integer("2147483648"));
        assert!(is_long("2147483648"));
        assert!(!is_long("12.5"));
        assert!(!is_long(""));
    }

    #[test]
    fn test_strings() {
        assert!(is_valid_string(" a "));
        assert!(!is_valid_string("  \t"));
        assert!(is_alphanumeric("server_01"));
        assert!(!is_alphanumeric("server-01"));
        assert!(!is_alphanumeric(""));
    }

    #[test]
    fn test_booleans() {
        assert!(is_boolean("Off"));
        assert!(!is_boolean("1"));
    }

    #[test]
    fn test_enum_membership_ignores_case() {
        assert!(is_member::<Colour>("green"));
        assert!(!is_member::<Colour>("blue"));
    }

    #[test]
    fn test_dates() {
        assert!(is_valid_iso8601("2024-01-01T00:00:00Z"));
        assert!(!is_valid_iso8601("yesterday"));
        assert!(is_valid_millis("0"));
        assert!(!is_valid_millis("-1"));
        assert!(!is_future_millis("0"));
        assert!(is_future_millis(&i64::MAX.to_string()));
    }
}
