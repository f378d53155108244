use crate::tasks::TaskError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Task(#[from] TaskError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// Generator constructors report bad parameters as `InvalidInput`.
    pub(crate) fn from_generator(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::InvalidInput => BuildError::InvalidParameter(e.to_string()),
            _ => BuildError::Io(e),
        }
    }
}
