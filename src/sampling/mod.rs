mod error;
mod gamma;
mod normal;
mod random_source;

pub use error::SamplingError;
pub use gamma::{MAX_REJECTION_ATTEMPTS, sample_gamma};
pub use normal::sample_normal;
pub use random_source::RandomSource;
