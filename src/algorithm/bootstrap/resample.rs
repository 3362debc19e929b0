//! Resampling with replacement

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Dataset;

/// Random stream for one replication
///
/// Each replication owns a stream derived from the base seed and its index,
/// so results do not depend on which worker runs it or in what order.
#[must_use]
pub fn replication_rng(seed: u64, replication: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(replication as u64))
}

/// `n` row indices drawn uniformly with replacement from `0..n`
pub fn draw_indices<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    (0..n).map(|_| rng.random_range(0..n)).collect()
}

/// A resample draw of the same size as `dataset`
pub fn resample<R: Rng + ?Sized>(dataset: &Dataset, rng: &mut R) -> Dataset {
    dataset.select(&draw_indices(dataset.len(), rng))
}
