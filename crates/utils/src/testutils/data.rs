//! Deterministic fixture data for tests and benchmarks.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Returns `size` pseudo-random bytes. The same `seed` always yields the
/// same bytes, so tests comparing against fixtures are reproducible.
pub fn fixture(size: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0; size];
    rng.fill_bytes(&mut data);
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_bytes() {
        assert_eq!(fixture(100, 7), fixture(100, 7));
    }

    #[test]
    fn different_seed_different_bytes() {
        assert_ne!(fixture(100, 7), fixture(100, 8));
    }

    #[test]
    fn requested_size_is_honored() {
        assert_eq!(0, fixture(0, 1).len());
        assert_eq!(4097, fixture(4097, 1).len());
    }
}
