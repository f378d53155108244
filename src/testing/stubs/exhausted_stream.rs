use crate::sampling::{MAX_REJECTION_ATTEMPTS, SamplingError};
use crate::streams::SampleStream;

/// Fails every draw as if the rejection sampler hit its cap.
#[derive(Default)]
pub struct ExhaustedStream;

impl SampleStream for ExhaustedStream {
    fn describe(&self) -> String {
        "ExhaustedStream".into()
    }

    fn next_sample(&mut self) -> Result<f64, SamplingError> {
        Err(SamplingError::RejectionLimitExceeded {
            shape: f64::NAN,
            attempts: MAX_REJECTION_ATTEMPTS,
        })
    }

    fn restart(&mut self) {}
}
