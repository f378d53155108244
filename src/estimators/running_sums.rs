use crate::estimators::Estimator;

/// Running count, sum and sum of squares.
///
/// Enough state for the "bariance" family: both formulas below are
/// algebraically `2 * unbiased_variance`, computed in one pass from raw sums.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunningSums {
    count: u64,
    sum: f64,
    sum_sq: f64,
}

impl RunningSums {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(x: &[f64]) -> Self {
        let mut sums = Self::new();
        sums.extend_from_slice(x);
        sums
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn sum_sq(&self) -> f64 {
        self.sum_sq
    }

    /// `2 * sum_sq / (n - 1) - 2 * sum^2 / (n * (n - 1))`
    #[inline]
    pub fn bariance(&self) -> f64 {
        let n = self.count as f64;
        (2.0 * self.sum_sq / (n - 1.0)) - (2.0 * self.sum * self.sum) / (n * (n - 1.0))
    }

    /// `(sum_sq - sum^2 / n) * 2 / (n - 1)`
    #[inline]
    pub fn alt_bariance(&self) -> f64 {
        let n = self.count as f64;
        (self.sum_sq - (self.sum * self.sum) / n) * 2.0 / (n - 1.0)
    }
}

impl Estimator for RunningSums {
    #[inline]
    fn add(&mut self, v: f64) {
        self.count += 1;
        self.sum += v;
        self.sum_sq += v * v;
    }

    fn estimation(&self) -> f64 {
        self.bariance()
    }
}

pub fn bariance(x: &[f64]) -> f64 {
    RunningSums::from_slice(x).bariance()
}

pub fn alt_bariance(x: &[f64]) -> f64 {
    RunningSums::from_slice(x).alt_bariance()
}
