use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// A 128-bit identifier compared by its raw bytes.
///
/// Displayed in canonical form: 32 lowercase hex characters without hyphens.
///
/// # Construction
/// - [`Uuid::random`] draws a fresh RFC 4122 version 4 identifier.
/// - [`Uuid::from_bytes`] wraps 16 raw bytes, such as those produced by
///   [`UuidFactory`](crate::UuidFactory).
/// - [`Uuid::parse`] accepts the canonical form or the hyphenated `8-4-4-4-12` form, in
///   either case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uuid(::uuid::Uuid);

impl Uuid {
    pub fn random() -> Self {
        Self(::uuid::Uuid::new_v4())
    }

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(::uuid::Uuid::from_bytes(bytes))
    }

    /// Parses 32 hex digits, optionally hyphenated at positions 8, 13, 18 and 23.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] for any other shape, including braced and URN
    /// forms.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !(Self::is_canonical(input) || Self::is_hyphenated(input)) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 32 hex characters, optionally hyphenated, got: '{input}'"
            )));
        }
        ::uuid::Uuid::try_parse(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("invalid UUID '{input}': {e}")))
    }

    /// Returns true if `input` is exactly 32 hex characters, in either case.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32 && input.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Returns true if `input` is the hyphenated `8-4-4-4-12` form, in either case.
    pub fn is_hyphenated(input: &str) -> bool {
        input.len() == 36
            && input.bytes().enumerate().all(|(i, b)| match i {
                8 | 13 | 18 | 23 => b == b'-',
                _ => b.is_ascii_hexdigit(),
            })
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// The raw bytes as an owned vector.
    pub fn value(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// The first 4 hex digits read as an unsigned integer.
    pub fn prefix(&self) -> u16 {
        let bytes = self.as_bytes();
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    /// The shard this identifier falls in within a space of `size` shards.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `size` is zero.
    pub fn shard(&self, size: u16) -> UuidResult<u16> {
        if size == 0 {
            return Err(UuidError::InvalidInput(
                "shard space cannot be empty".into(),
            ));
        }
        Ok(self.prefix() % size)
    }

    /// Lowercase `8-4-4-4-12` form.
    pub fn hyphenated(&self) -> String {
        self.0.hyphenated().to_string()
    }

    pub fn inner(&self) -> ::uuid::Uuid {
        self.0
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for Uuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse(s)
    }
}

impl From<::uuid::Uuid> for Uuid {
    fn from(value: ::uuid::Uuid) -> Self {
        Self(value)
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(bytes: [u8; 16]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uuid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uuid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Uuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
