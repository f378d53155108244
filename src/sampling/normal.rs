use crate::sampling::RandomSource;

/// Draws from `N(mean, std_dev^2)` by shifting and scaling a standard deviate.
#[inline]
pub fn sample_normal<R: RandomSource + ?Sized>(source: &mut R, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * source.next_gaussian()
}
