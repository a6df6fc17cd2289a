use std::hash::{BuildHasher, Hasher};

/// Maps a key's bits to the bucket a probe starts from.
///
/// Hash quality only affects probe length, never correctness: lookups confirm
/// every candidate bucket against the stored key.
pub trait KeyHasher {
    /// Returns a bucket in `0..buckets`. `buckets` is never zero.
    fn bucket(&self, bits: u64, buckets: usize) -> usize;
}

/// `key * key mod M`.
///
/// Deterministic and easy to reason about when debugging, but numerically
/// close keys land close together; size the table generously or switch to
/// [`AHashHasher`].
#[derive(Debug, Default, Copy, Clone)]
pub struct SquareHasher;

impl KeyHasher for SquareHasher {
    #[inline]
    fn bucket(&self, bits: u64, buckets: usize) -> usize {
        (bits.wrapping_mul(bits) % buckets as u64) as usize
    }
}

/// A keyed hasher backed by `ahash` with fixed seeds, so bucket placement is
/// reproducible between runs on the same machine.
#[derive(Clone)]
pub struct AHashHasher {
    state: ahash::RandomState,
}

impl AHashHasher {
    const SEEDS: [u64; 4] = [
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    ];

    /// Creates a hasher from explicit seeds.
    pub fn with_seeds(k0: u64, k1: u64, k2: u64, k3: u64) -> Self {
        AHashHasher {
            state: ahash::RandomState::with_seeds(k0, k1, k2, k3),
        }
    }
}

impl Default for AHashHasher {
    fn default() -> Self {
        let [k0, k1, k2, k3] = Self::SEEDS;
        Self::with_seeds(k0, k1, k2, k3)
    }
}

impl KeyHasher for AHashHasher {
    #[inline]
    fn bucket(&self, bits: u64, buckets: usize) -> usize {
        let mut hasher = self.state.build_hasher();
        hasher.write_u64(bits);
        (hasher.finish() % buckets as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_hasher_squares_modulo_bucket_count() {
        let hasher = SquareHasher;
        assert_eq!(hasher.bucket(7, 100), 49);
        assert_eq!(hasher.bucket(5, 100), 25);
        assert_eq!(hasher.bucket(10, 100), 0);
        assert_eq!(hasher.bucket(u64::MAX, 100), 1);
    }

    #[test]
    fn ahash_hasher_is_deterministic_and_in_range() {
        let a = AHashHasher::default();
        let b = AHashHasher::default();

        for bits in 0..1000 {
            let bucket = a.bucket(bits, 37);
            assert!(bucket < 37);
            assert_eq!(bucket, b.bucket(bits, 37));
        }
    }
}
