//! Lenient boolean parsing.

use crate::constants::{FALSE_TOKENS, TRUE_TOKENS};

/// Parses a recognised boolean token, ignoring case.
///
/// Returns `None` for anything outside `true/yes/on` and `false/no/off`.
pub fn parse(value: &str) -> Option<bool> {
    let matches = |tokens: &[&str]| tokens.iter().any(|t| value.eq_ignore_ascii_case(t));
    if matches(TRUE_TOKENS) {
        Some(true)
    } else if matches(FALSE_TOKENS) {
        Some(false)
    } else {
        None
    }
}

/// Reads `value` as a boolean; absent or unrecognised input reads as `false`.
pub fn to_boolean(value: Option<&str>) -> bool {
    value.and_then(parse).unwrap_or(false)
}
