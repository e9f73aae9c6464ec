use std::fmt;

/// Two independently mutable optional slots.
///
/// Equality is pointwise and the derived hash combines both slots, so a `Pair` can be used
/// as a map key as long as neither slot is mutated while it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Pair<F, S> {
    first: Option<F>,
    second: Option<S>,
}

impl<F, S> Pair<F, S> {
    /// Creates a pair with both slots filled.
    pub fn new(first: F, second: S) -> Self {
        Self {
            first: Some(first),
            second: Some(second),
        }
    }

    /// Creates a pair with both slots empty.
    pub fn empty() -> Self {
        Self {
            first: None,
            second: None,
        }
    }

    pub fn first(&self) -> Option<&F> {
        self.first.as_ref()
    }

    pub fn second(&self) -> Option<&S> {
        self.second.as_ref()
    }

    /// Replaces the first slot, returning the previous value.
    pub fn set_first(&mut self, first: Option<F>) -> Option<F> {
        std::mem::replace(&mut self.first, first)
    }

    /// Replaces the second slot, returning the previous value.
    pub fn set_second(&mut self, second: Option<S>) -> Option<S> {
        std::mem::replace(&mut self.second, second)
    }

    pub fn into_parts(self) -> (Option<F>, Option<S>) {
        (self.first, self.second)
    }
}

impl<F: fmt::Display, S: fmt::Display> fmt::Display for Pair<F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn slot<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "none".to_string(), ToString::to_string)
        }
        write!(f, "first={}; second={}", slot(&self.first), slot(&self.second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_pointwise_equality() {
        assert_eq!(Pair::new(1, "a"), Pair::new(1, "a"));
        assert_ne!(Pair::new(1, "a"), Pair::new(2, "a"));
        assert_eq!(Pair::<i32, &str>::empty(), Pair::empty());
    }

    #[test]
    fn test_equal_pairs_hash_equal() {
        assert_eq!(hash_of(&Pair::new(7, 'x')), hash_of(&Pair::new(7, 'x')));
    }

    #[test]
    fn test_slots_are_mutable() {
        let mut pair = Pair::new("left", 1);
        assert_eq!(pair.set_first(None), Some("left"));
        assert_eq!(pair.first(), None);
        pair.set_second(Some(2));
        assert_eq!(pair.second(), Some(&2));
        assert_eq!(pair.into_parts(), (None, Some(2)));
    }

    #[test]
    fn test_display_handles_empty_slots() {
        let mut pair = Pair::new(1, 2);
        assert_eq!(pair.to_string(), "first=1; second=2");
        pair.set_second(None);
        assert_eq!(pair.to_string(), "first=1; second=none");
    }
}
