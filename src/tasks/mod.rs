pub mod divisor_sweep;
pub mod error;
pub mod identity_check;
pub mod runtime_benchmark;

pub use divisor_sweep::{DivisorRow, DivisorSweep, DivisorSweepParams, DivisorSweepReport};
pub use error::TaskError;
pub use identity_check::{Identity, IdentityCheck, IdentityOutcome, IdentityReport};
pub use runtime_benchmark::{
    BenchmarkSummary, QUADRATIC_WARN_SIZE, RuntimeBenchmark, validate_benchmark,
};
