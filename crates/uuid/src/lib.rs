//! Identifier utilities.
//!
//! - [`Uuid`]: a 128-bit identifier whose canonical text form is **32 lowercase
//!   hexadecimal characters** (no hyphens), e.g. `550e8400e29b41d4a716446655440000`.
//! - [`UuidFactory`]: generates identifiers that land in a chosen shard.
//! - [`IdFactory`]: random UUID strings, UUID validation and CRC64-derived numeric ids.
//!
//! ## Shards
//!
//! The shard of an identifier in a space of `size` shards is its first 4 hex digits,
//! read as an unsigned 16-bit integer, modulo `size`. Sizes range over
//! `1..=`[`MAX_SIZE`](constants::MAX_SIZE).
//!
//! ```
//! use toolbox_uuid::UuidFactory;
//!
//! let factory = UuidFactory::new(256).unwrap();
//! let uuid = factory.generate(7).unwrap().expect("shard 7 is reachable");
//! assert_eq!(uuid.shard(256).unwrap(), 7);
//! ```

pub mod constants;
mod factory;
mod id_factory;
mod uuid;

pub use factory::UuidFactory;
pub use id_factory::IdFactory;
pub use uuid::Uuid;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
