use crate::estimators::Estimator;

/// Divisor applied to the accumulated sum of squared deviations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Correction {
    /// Divide by `n - 1`.
    #[default]
    Unbiased,
    /// Divide by `n`.
    Biased,
}

/// Welford's running mean / M2 accumulator.
///
/// Single pass and numerically stable: each update moves the mean by
/// `delta / count` and grows M2 by `delta * (x - new_mean)`, avoiding the
/// cancellation of the raw sum-of-squares formula.
#[derive(Debug, Default, Clone, Copy)]
pub struct WelfordVariance {
    correction: Correction,
    count: u64,
    mean: f64,
    m2: f64,
}

impl WelfordVariance {
    pub fn new(correction: Correction) -> Self {
        Self {
            correction,
            ..Self::default()
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Running sum of squared deviations from the running mean.
    pub fn m2(&self) -> f64 {
        self.m2
    }
}

impl Estimator for WelfordVariance {
    #[inline]
    fn add(&mut self, v: f64) {
        self.count += 1;
        let delta = v - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (v - self.mean);
    }

    #[inline]
    fn estimation(&self) -> f64 {
        let n = self.count as f64;
        match self.correction {
            Correction::Unbiased => self.m2 / (n - 1.0),
            Correction::Biased => self.m2 / n,
        }
    }
}

#[inline]
fn welford(x: &[f64], correction: Correction) -> f64 {
    let mut acc = WelfordVariance::new(correction);
    acc.extend_from_slice(x);
    acc.estimation()
}

/// Streaming counterpart of [`unbiased_variance`](super::unbiased_variance).
pub fn welford_unbiased_variance(x: &[f64]) -> f64 {
    welford(x, Correction::Unbiased)
}

/// Streaming counterpart of [`biased_variance`](super::biased_variance).
pub fn welford_biased_variance(x: &[f64]) -> f64 {
    welford(x, Correction::Biased)
}

pub fn welford_population_variance(x: &[f64]) -> f64 {
    welford_biased_variance(x)
}
