//! Shard-targeted identifier generation.
//!
//! A candidate is two random 64-bit words, each with the high bit forced. Candidates that
//! miss the requested shard are parked in a process-wide cache under the shard they did
//! hit, so a later request for that shard is served without drawing. Balanced workloads
//! therefore waste very few draws.

use parking_lot::Mutex;
use rand::Rng;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::constants::{DEFAULT_SIZE, HIGH_BIT, MAX_SIZE};
use crate::{Uuid, UuidError, UuidResult};

/// Rejected candidates keyed by `(size, shard)`, at most one per key.
static MISS_CACHE: LazyLock<Mutex<HashMap<(u16, u16), [u8; 16]>>> =
    LazyLock::new(|| Mutex::new(HashMap::with_capacity(1024)));

/// Generates [`Uuid`]s whose shard, within a fixed space of `size` shards, is chosen by
/// the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UuidFactory {
    size: u16,
}

impl Default for UuidFactory {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE }
    }
}

impl UuidFactory {
    /// Creates a factory over `size` shards.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] unless `1 <= size <= MAX_SIZE`.
    pub fn new(size: u16) -> UuidResult<Self> {
        check_size(size)?;
        Ok(Self { size })
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// Generates an identifier in shard `target` of this factory's space.
    ///
    /// See [`UuidFactory::generate_in`].
    pub fn generate(&self, target: u16) -> UuidResult<Option<Uuid>> {
        Self::generate_in(self.size, target)
    }

    /// Generates an identifier whose shard within `size` shards equals `target`.
    ///
    /// A cached candidate for `(size, target)` is returned first. Otherwise up to
    /// [`MAX_SIZE`] candidates are drawn from the thread-local CSPRNG; each miss replaces
    /// the cached candidate for the shard it landed in.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if every draw missed. This is only plausible for large `size`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `size` is out of range or `target >= size`.
    pub fn generate_in(size: u16, target: u16) -> UuidResult<Option<Uuid>> {
        check_size(size)?;
        if target >= size {
            return Err(UuidError::InvalidInput(format!(
                "target {target} must be less than size {size}"
            )));
        }

        if let Some(bytes) = MISS_CACHE.lock().remove(&(size, target)) {
            tracing::trace!(size, target, "served shard from cache");
            return Ok(Some(Uuid::from_bytes(bytes)));
        }

        let mut rng = rand::thread_rng();
        for _ in 0..MAX_SIZE {
            let high = rng.gen::<u64>() | HIGH_BIT;
            let low = rng.gen::<u64>() | HIGH_BIT;
            let shard = ((high >> 48) as u16) % size;

            let mut bytes = [0u8; 16];
            bytes[..8].copy_from_slice(&high.to_be_bytes());
            bytes[8..].copy_from_slice(&low.to_be_bytes());

            if shard == target {
                return Ok(Some(Uuid::from_bytes(bytes)));
            }
            MISS_CACHE.lock().insert((size, shard), bytes);
        }

        tracing::warn!(size, target, attempts = MAX_SIZE, "no candidate hit the target shard");
        Ok(None)
    }

    /// The shard of an existing identifier string in this factory's space.
    pub fn target(&self, uuid: &str) -> UuidResult<u16> {
        Self::target_in(self.size, uuid)
    }

    /// The shard of an existing identifier string within `size` shards.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `size` is out of range or `uuid` does not
    /// parse.
    pub fn target_in(size: u16, uuid: &str) -> UuidResult<u16> {
        check_size(size)?;
        Uuid::parse(uuid)?.shard(size)
    }

    /// Returns true only for 32 hex characters without hyphens, in either case.
    pub fn is_valid(uuid: &str) -> bool {
        Uuid::is_canonical(uuid)
    }
}

fn check_size(size: u16) -> UuidResult<()> {
    if size == 0 || size > MAX_SIZE {
        return Err(UuidError::InvalidInput(format!(
            "size must be between 1 and {MAX_SIZE}, got {size}"
        )));
    }
    Ok(())
}
