//! Shuffling and random sampling backed by the thread-local CSPRNG.

use rand::seq::SliceRandom;

/// The 256 possible byte values in ascending order.
pub const BYTE_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    table
};

/// Shuffles `values` in place and returns it for chaining.
pub fn shuffle<T>(values: &mut [T]) -> &mut [T] {
    values.shuffle(&mut rand::thread_rng());
    values
}

/// Returns a copy of `value` with its characters in random order.
pub fn shuffle_str(value: &str) -> String {
    let mut chars: Vec<char> = value.chars().collect();
    shuffle(&mut chars);
    chars.into_iter().collect()
}

/// Generates `length` random bytes drawn from [`BYTE_TABLE`].
pub fn random_bytes(length: usize) -> Vec<u8> {
    let mut table = BYTE_TABLE;
    random_from(length, &mut table)
}

/// Generates `length` values sampled with replacement from `samples`.
///
/// `samples` is shuffled as a side effect. Returns an empty vector when `samples` is
/// empty.
pub fn random_from<T: Copy>(length: usize, samples: &mut [T]) -> Vec<T> {
    let mut rng = rand::thread_rng();
    samples.shuffle(&mut rng);
    (0..length)
        .filter_map(|_| samples.choose(&mut rng).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut values: Vec<u32> = (0..100).collect();
        shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_str_is_permutation() {
        let shuffled = shuffle_str("toolbox");
        let mut a: Vec<char> = shuffled.chars().collect();
        let mut b: Vec<char> = "toolbox".chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_bytes_length() {
        assert_eq!(random_bytes(32).len(), 32);
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_random_from_samples_only() {
        let mut samples = ['a', 'b', 'c'];
        let data = random_from(50, &mut samples);
        assert_eq!(data.len(), 50);
        assert!(data.iter().all(|c| ['a', 'b', 'c'].contains(c)));

        let empty: Vec<char> = random_from(5, &mut []);
        assert!(empty.is_empty());
    }
}
