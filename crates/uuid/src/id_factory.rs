use toolbox_core::hash::crc64;
use toolbox_core::security;

use crate::{Uuid, UuidError, UuidResult};

/// Random identifier helpers.
pub struct IdFactory;

impl IdFactory {
    /// A random version 4 UUID in lowercase hyphenated form.
    pub fn uuid() -> String {
        Uuid::random().hyphenated()
    }

    /// A random version 4 UUID as 32 lowercase hex characters.
    pub fn uuid_simple() -> String {
        Uuid::random().to_string()
    }

    /// Checks the shape of a UUID string, ignoring case.
    ///
    /// With `with_hyphens` the `8-4-4-4-12` form is required, otherwise 32 bare hex digits.
    pub fn is_valid_uuid(uuid: &str, with_hyphens: bool) -> bool {
        if with_hyphens {
            Uuid::is_hyphenated(uuid)
        } else {
            Uuid::is_canonical(uuid)
        }
    }

    /// A random numeric id.
    ///
    /// The CRC64 of a fresh UUID's two halves, rendered as signed decimals (least
    /// significant half first), with the sign dropped.
    pub fn id() -> u64 {
        let bytes = Uuid::random().as_bytes().to_owned();
        let (most, least) = bytes.split_at(8);
        let word = |half: &[u8]| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(half);
            i64::from_be_bytes(buf)
        };
        let text = format!("{}{}", word(least), word(most));
        (crc64(text.as_bytes()) as i64).unsigned_abs()
    }

    /// A random numeric id below `divisor`, from the CRC64 of 16 random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `divisor` is zero.
    pub fn id_with_divisor(divisor: u64) -> UuidResult<u64> {
        if divisor == 0 {
            return Err(UuidError::InvalidInput("divisor cannot be zero".into()));
        }
        let bytes = security::random_bytes(16);
        Ok((crc64(&bytes) as i64).unsigned_abs() % divisor)
    }
}
