/// Online scalar estimator.
///
/// Implementations accept values incrementally via [`add`](Estimator::add)
/// and expose the current estimate via [`estimation`](Estimator::estimation).
pub trait Estimator {
    /// Incorporates a new observation.
    fn add(&mut self, v: f64);

    /// Returns the current estimate.
    fn estimation(&self) -> f64;

    /// Feeds every value of `values` in order.
    fn extend_from_slice(&mut self, values: &[f64]) {
        for &v in values {
            self.add(v);
        }
    }
}
