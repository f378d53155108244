/// Arithmetic mean, `sum / n`. NaN for an empty slice.
#[inline]
pub fn mean(x: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &v in x {
        sum += v;
    }
    sum / x.len() as f64
}

/// Sum of squared deviations from the sample mean (first pass: mean,
/// second pass: deviations).
#[inline]
pub fn sum_squared_deviations(x: &[f64]) -> f64 {
    let mean = mean(x);
    let mut sum_sq = 0.0;
    for &v in x {
        sum_sq += (v - mean) * (v - mean);
    }
    sum_sq
}

/// Sample variance with Bessel's correction, `SS / (n - 1)`.
pub fn unbiased_variance(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    sum_squared_deviations(x) / (n - 1.0)
}

/// Maximum-likelihood variance, `SS / n`.
pub fn biased_variance(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    sum_squared_deviations(x) / n
}

/// Same quantity as [`biased_variance`], kept as its own entry so the two
/// names can be timed separately.
pub fn population_variance(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    sum_squared_deviations(x) / n
}
