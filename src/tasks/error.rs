use crate::sampling::SamplingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Sampling(#[from] SamplingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
