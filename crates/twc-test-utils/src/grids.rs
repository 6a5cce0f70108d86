//! Deterministic grid data for tests and benchmarks.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use twc_core::GridShape;

/// One value per cell, uniformly drawn from `[-100, 100)`.
///
/// The same `(shape, seed)` always yields the same field.
pub fn random_field(shape: GridShape, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..shape.cell_count())
        .map(|_| rng.random_range(-100.0..100.0))
        .collect()
}

/// One value per cell equal to the cell's linear offset plus `offset`.
///
/// Makes indexing mistakes visible: a value read from the wrong cell
/// has the wrong integer part.
pub fn ramp_field(shape: GridShape, offset: f64) -> Vec<f64> {
    (0..shape.cell_count()).map(|p| p as f64 + offset).collect()
}
