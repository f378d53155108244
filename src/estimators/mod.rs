//! Variance estimator kernel.
//!
//! Every free function takes the whole sample slice and returns a raw `f64`.
//! None of them guard the sample size: with fewer than two samples the
//! `n - 1` divisors yield NaN or infinities instead of an error. Use
//! [`EstimatorKind::try_estimate`] when a checked entry point is wanted.

mod estimator;
mod kind;
mod pairwise;
mod running_sums;
mod two_pass;
mod welford;

pub use estimator::Estimator;
pub use kind::{EstimateError, EstimatorKind};
pub use pairwise::{biased_pairwise, naive_pairwise_variance, unbiased_pairwise};
pub use running_sums::{RunningSums, alt_bariance, bariance};
pub use two_pass::{
    biased_variance, mean, population_variance, sum_squared_deviations, unbiased_variance,
};
pub use welford::{
    Correction, WelfordVariance, welford_biased_variance, welford_population_variance,
    welford_unbiased_variance,
};
