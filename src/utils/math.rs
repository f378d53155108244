use statrs::distribution::{ContinuousCDF, StudentsT};

/// Standard normal CDF.
pub fn normal_probability(a: f64) -> f64 {
    0.5 * (1.0 + libm::erf(a / (2.0f64).sqrt()))
}

/// Quantile of Student's t distribution with `df` degrees of freedom.
///
/// Returns NaN when `df` is not a positive finite number.
pub fn student_t_quantile(p: f64, df: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, df) {
        Ok(t) => t.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}
