use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Pseudo-random source consumed by the samplers.
///
/// Every call advances the source. Two sources built from the same seed
/// yield the same sequence of uniform and normal draws, which is what makes
/// a seeded benchmark reproducible.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Standard normal deviate (mean 0, variance 1).
    fn next_gaussian(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    #[inline]
    fn next_gaussian(&mut self) -> f64 {
        StandardNormal.sample(self)
    }
}
