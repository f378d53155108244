use crate::sampling::SamplingError;

/// Pull-based source of `f64` samples.
///
/// Generators are unbounded: every call to [`next_sample`] produces a new
/// draw. Errors only surface when a rejection sampler exhausts its retry cap.
pub trait SampleStream {
    /// Short human-readable description, e.g. `Gamma(shape=2, scale=2)`.
    fn describe(&self) -> String;

    /// Produces the next sample.
    fn next_sample(&mut self) -> Result<f64, SamplingError>;

    /// Resets the stream to its initial state.
    ///
    /// Seeded generators replay the same sequence after a restart;
    /// unseeded ones draw a fresh seed from the operating system.
    fn restart(&mut self);

    /// Collects the next `n` samples into a fresh vector.
    fn take_samples(&mut self, n: usize) -> Result<Vec<f64>, SamplingError> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.next_sample()?);
        }
        Ok(out)
    }
}
