//! Limits of the sharded identifier space.

/// Shard space used by `UuidFactory::default`.
pub const DEFAULT_SIZE: u16 = 1;

/// Largest shard space, and the number of candidates drawn before a generation gives up.
pub const MAX_SIZE: u16 = 32_767;

/// Forced on both random halves so each renders as exactly 16 hex digits.
pub const HIGH_BIT: u64 = 0x8000_0000_0000_0000;
