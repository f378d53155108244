use crate::estimators::{
    alt_bariance, bariance, biased_pairwise, biased_variance, naive_pairwise_variance,
    population_variance, unbiased_pairwise, unbiased_variance, welford_biased_variance,
    welford_population_variance, welford_unbiased_variance,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EstimateError {
    #[error("{estimator} needs at least {required} samples, got {actual}")]
    InsufficientSamples {
        estimator: EstimatorKind,
        required: usize,
        actual: usize,
    },
}

/// Every timed estimator, named by the label it carries in runtime CSVs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
)]
pub enum EstimatorKind {
    Unbiased,
    Biased,
    PopulationVar,
    UnbiasedOptim,
    BiasedOptim,
    PopulationOptim,
    /// Also parsed from `BarianceOptim`, the label of the streaming-form
    /// result files.
    #[strum(to_string = "BarianceOpt", serialize = "BarianceOptim")]
    #[serde(alias = "BarianceOptim")]
    BarianceOpt,
    #[strum(to_string = "AltBariance", serialize = "AltBarianceOptim")]
    #[serde(alias = "AltBarianceOptim")]
    AltBariance,
    NaivePairwise,
    UnbiasedPairwise,
    BiasedPairwise,
}

impl EstimatorKind {
    /// The kernel function behind this label.
    pub fn function(self) -> fn(&[f64]) -> f64 {
        match self {
            EstimatorKind::Unbiased => unbiased_variance,
            EstimatorKind::Biased => biased_variance,
            EstimatorKind::PopulationVar => population_variance,
            EstimatorKind::UnbiasedOptim => welford_unbiased_variance,
            EstimatorKind::BiasedOptim => welford_biased_variance,
            EstimatorKind::PopulationOptim => welford_population_variance,
            EstimatorKind::BarianceOpt => bariance,
            EstimatorKind::AltBariance => alt_bariance,
            EstimatorKind::NaivePairwise => naive_pairwise_variance,
            EstimatorKind::UnbiasedPairwise => unbiased_pairwise,
            EstimatorKind::BiasedPairwise => biased_pairwise,
        }
    }

    /// Applies the estimator without any guard; see the module docs.
    #[inline]
    pub fn estimate(self, x: &[f64]) -> f64 {
        (self.function())(x)
    }

    /// Like [`estimate`](Self::estimate) but rejects samples with fewer than
    /// two values instead of returning NaN or infinities.
    pub fn try_estimate(self, x: &[f64]) -> Result<f64, EstimateError> {
        if x.len() < 2 {
            return Err(EstimateError::InsufficientSamples {
                estimator: self,
                required: 2,
                actual: x.len(),
            });
        }
        Ok(self.estimate(x))
    }

    /// Pairwise estimators loop over all `n * (n - 1) / 2` pairs.
    pub fn is_quadratic(self) -> bool {
        matches!(
            self,
            EstimatorKind::NaivePairwise
                | EstimatorKind::UnbiasedPairwise
                | EstimatorKind::BiasedPairwise
        )
    }
}
