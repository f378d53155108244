use crate::estimators::EstimatorKind;
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};

/// One timed estimator call: a row of the runtime CSV.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimingRecord {
    pub sample_size: usize,
    pub trial: u64,
    pub estimator: EstimatorKind,
    pub runtime_ns: u64,
}

impl Display for TimingRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "n={}, trial={}, estimator={}, t={}ns",
            self.sample_size, self.trial, self.estimator, self.runtime_ns
        )
    }
}

/// Progress notification sent by the runtime benchmark.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrialProgress {
    pub sample_size: usize,
    pub trials_done: u64,
    pub trials_total: u64,
    pub seconds: f64,
}

impl Display for TrialProgress {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "n={}, trial {}/{}, t={:.3}s",
            self.sample_size, self.trials_done, self.trials_total, self.seconds
        )
    }
}
