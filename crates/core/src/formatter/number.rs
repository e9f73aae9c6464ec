//! Integer parsing and fixed-width byte conversions.
//!
//! The byte orders are not symmetric: 64-bit values are laid out little-endian while
//! 32-bit values are laid out big-endian. Existing consumers depend on both layouts.

use crate::{CoreError, CoreResult};

/// Parses a decimal string into an `i64`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if `value` is not a valid 64-bit integer.
pub fn as_long(value: &str) -> CoreResult<i64> {
    value
        .parse::<i64>()
        .map_err(|e| CoreError::InvalidInput(format!("'{value}' is not a valid long: {e}")))
}

/// Little-endian bytes of `value`.
pub fn long_to_bytes(value: i64) -> [u8; 8] {
    value.to_le_bytes()
}

/// Inverse of [`long_to_bytes`].
pub fn bytes_to_long(bytes: [u8; 8]) -> i64 {
    i64::from_le_bytes(bytes)
}

/// Big-endian bytes of `value`.
pub fn int_to_bytes(value: i32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Inverse of [`int_to_bytes`].
pub fn bytes_to_int(bytes: [u8; 4]) -> i32 {
    i32::from_be_bytes(bytes)
}

/// Reads a big-endian `i32` from the first four bytes of a slice.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if fewer than four bytes are supplied.
pub fn slice_to_int(bytes: &[u8]) -> CoreResult<i32> {
    let head: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| CoreError::InvalidInput(format!("need 4 bytes, got {}", bytes.len())))?;
    Ok(bytes_to_int(head))
}

/// Reads a little-endian `i64` from the first eight bytes of a slice.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if fewer than eight bytes are supplied.
pub fn slice_to_long(bytes: &[u8]) -> CoreResult<i64> {
    let head: [u8; 8] = bytes
        .get(..8)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| CoreError::InvalidInput(format!("need 8 bytes, got {}", bytes.len())))?;
    Ok(bytes_to_long(head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_int_layout_is_big_endian() {
        assert_eq!(int_to_bytes(0x0102_0304), [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_long_layout_is_little_endian() {
        assert_eq!(
            long_to_bytes(0x0102_0304_0506_0708),
            [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_as_long() {
        assert_eq!(as_long("-42").unwrap(), -42);
        assert!(matches!(as_long("4x"), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_slice_helpers_check_length() {
        assert_eq!(slice_to_int(&[0, 0, 1, 0, 99]).unwrap(), 256);
        assert!(slice_to_int(&[1, 2]).is_err());
        assert!(slice_to_long(&[0; 7]).is_err());
        assert_eq!(slice_to_long(&[1, 0, 0, 0, 0, 0, 0, 0]).unwrap(), 1);
    }

    proptest! {
        #[test]
        fn test_int_round_trip(value in any::<i32>()) {
            prop_assert_eq!(bytes_to_int(int_to_bytes(value)), value);
        }

        #[test]
        fn test_long_round_trip(value in any::<i64>()) {
            prop_assert_eq!(bytes_to_long(long_to_bytes(value)), value);
        }
    }
}
