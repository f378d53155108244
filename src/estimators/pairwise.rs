/// Mean squared difference over all unordered pairs,
/// `sum_{i<j} (x_i - x_j)^2 * 2 / (n * (n - 1))`.
///
/// Quadratic in `n`. Equals `2 * unbiased_variance` and serves as an
/// independent check of the single-pass formulas.
pub fn naive_pairwise_variance(x: &[f64]) -> f64 {
    let n = x.len();
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let diff = x[i] - x[j];
            sum += diff * diff;
        }
    }
    let n = n as f64;
    sum * 2.0 / (n * (n - 1.0))
}

/// Identical to [`naive_pairwise_variance`]; no extra scaling is applied.
pub fn unbiased_pairwise(x: &[f64]) -> f64 {
    naive_pairwise_variance(x)
}

/// Pairwise form rescaled by `(n - 1) / n`, i.e. `2 * biased_variance`.
pub fn biased_pairwise(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    naive_pairwise_variance(x) * ((n - 1.0) / n)
}
