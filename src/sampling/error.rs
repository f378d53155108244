use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SamplingError {
    #[error("gamma rejection sampler (shape={shape}) gave up after {attempts} attempts")]
    RejectionLimitExceeded { shape: f64, attempts: usize },
}
