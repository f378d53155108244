use crate::estimators::{
    alt_bariance, bariance, biased_pairwise, biased_variance, naive_pairwise_variance,
    population_variance, unbiased_pairwise, unbiased_variance, welford_biased_variance,
    welford_unbiased_variance,
};
use crate::streams::SampleStream;
use crate::tasks::TaskError;
use serde::Serialize;
use strum_macros::{Display, EnumIter, IntoStaticStr};
use tracing::{info, warn};

/// Relationship between two estimators that must hold on any sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumIter, Display, IntoStaticStr)]
pub enum Identity {
    /// `biased == population`
    BiasedIsPopulation,
    /// `bariance == 2 * unbiased`
    BarianceIsTwiceUnbiased,
    /// `alt_bariance == 2 * unbiased`
    AltBarianceIsTwiceUnbiased,
    /// Welford `n - 1` form matches two-pass
    WelfordUnbiasedMatchesTwoPass,
    /// Welford `n` form matches two-pass
    WelfordBiasedMatchesTwoPass,
    /// `naive_pairwise == 2 * unbiased`
    PairwiseIsTwiceUnbiased,
    /// `unbiased_pairwise == naive_pairwise`
    UnbiasedPairwiseIsNaive,
    /// `biased_pairwise == 2 * biased`
    BiasedPairwiseIsTwiceBiased,
}

impl Identity {
    pub fn is_pairwise(self) -> bool {
        matches!(
            self,
            Identity::PairwiseIsTwiceUnbiased
                | Identity::UnbiasedPairwiseIsNaive
                | Identity::BiasedPairwiseIsTwiceBiased
        )
    }

    /// `(left, right)` sides of the identity evaluated on `x`.
    pub fn sides(self, x: &[f64]) -> (f64, f64) {
        match self {
            Identity::BiasedIsPopulation => (biased_variance(x), population_variance(x)),
            Identity::BarianceIsTwiceUnbiased => (bariance(x), 2.0 * unbiased_variance(x)),
            Identity::AltBarianceIsTwiceUnbiased => (alt_bariance(x), 2.0 * unbiased_variance(x)),
            Identity::WelfordUnbiasedMatchesTwoPass => {
                (welford_unbiased_variance(x), unbiased_variance(x))
            }
            Identity::WelfordBiasedMatchesTwoPass => {
                (welford_biased_variance(x), biased_variance(x))
            }
            Identity::PairwiseIsTwiceUnbiased => {
                (naive_pairwise_variance(x), 2.0 * unbiased_variance(x))
            }
            Identity::UnbiasedPairwiseIsNaive => (unbiased_pairwise(x), naive_pairwise_variance(x)),
            Identity::BiasedPairwiseIsTwiceBiased => {
                (biased_pairwise(x), 2.0 * biased_variance(x))
            }
        }
    }
}

/// One identity evaluated on one sample draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdentityOutcome {
    pub check: usize,
    pub identity: Identity,
    pub left: f64,
    pub right: f64,
    pub diff: f64,
    pub tolerance: f64,
}

impl IdentityOutcome {
    pub fn passed(&self) -> bool {
        self.diff <= self.tolerance
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IdentityReport {
    pub outcomes: Vec<IdentityOutcome>,
}

impl IdentityReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(IdentityOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &IdentityOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// Largest absolute difference seen for `identity`, if it was checked.
    pub fn max_diff(&self, identity: Identity) -> Option<f64> {
        self.outcomes
            .iter()
            .filter(|o| o.identity == identity)
            .map(|o| o.diff)
            .reduce(f64::max)
    }
}

/// Draws `checks` independent samples of size `sample_size` and verifies
/// the estimator identities on each.
pub struct IdentityCheck {
    stream: Box<dyn SampleStream>,
    sample_size: usize,
    checks: usize,
    tolerance: f64,
    pairwise_tolerance: f64,
    include_pairwise: bool,
}

impl IdentityCheck {
    pub fn new(
        stream: Box<dyn SampleStream>,
        sample_size: usize,
        checks: usize,
        tolerance: f64,
        include_pairwise: bool,
    ) -> Result<Self, TaskError> {
        if sample_size < 2 {
            return Err(TaskError::InvalidParameter(
                "sample_size must be >= 2".into(),
            ));
        }
        if checks == 0 {
            return Err(TaskError::InvalidParameter("checks must be > 0".into()));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(TaskError::InvalidParameter(
                "tolerance must be finite and > 0".into(),
            ));
        }
        Ok(Self {
            stream,
            sample_size,
            checks,
            tolerance,
            pairwise_tolerance: tolerance.max(1e-10),
            include_pairwise,
        })
    }

    /// Overrides the tolerance used for the quadratic pairwise identities.
    pub fn with_pairwise_tolerance(mut self, tolerance: f64) -> Self {
        self.pairwise_tolerance = tolerance;
        self
    }

    /// Restarts the stream first, so a seeded check sees the same draws on
    /// every run.
    pub fn run(&mut self) -> Result<IdentityReport, TaskError> {
        use strum::IntoEnumIterator;

        self.stream.restart();
        info!(
            stream = %self.stream.describe(),
            sample_size = self.sample_size,
            checks = self.checks,
            "checking estimator identities"
        );

        let mut report = IdentityReport::default();
        for check in 0..self.checks {
            let data = self.stream.take_samples(self.sample_size)?;
            for identity in Identity::iter() {
                if identity.is_pairwise() && !self.include_pairwise {
                    continue;
                }
                let tolerance = if identity.is_pairwise() {
                    self.pairwise_tolerance
                } else {
                    self.tolerance
                };
                let (left, right) = identity.sides(&data);
                let outcome = IdentityOutcome {
                    check,
                    identity,
                    left,
                    right,
                    diff: (left - right).abs(),
                    tolerance,
                };
                if !outcome.passed() {
                    warn!(
                        check,
                        %identity,
                        left,
                        right,
                        diff = outcome.diff,
                        tolerance,
                        "identity mismatch"
                    );
                }
                report.outcomes.push(outcome);
            }
        }

        info!(passed = report.passed(), "identity check complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::generators::GammaGenerator;
    use crate::testing::fixtures::textbook_sample;
    use crate::testing::{ExhaustedStream, VecStream};
    use strum::IntoEnumIterator;

    #[test]
    fn every_identity_holds_on_textbook_data() {
        let x = textbook_sample();
        for identity in Identity::iter() {
            let (l, r) = identity.sides(&x);
            assert!((l - r).abs() < 1e-10, "{identity}: {l} vs {r}");
        }
    }

    #[test]
    fn textbook_stream_passes_all_checks() {
        let mut check =
            IdentityCheck::new(Box::new(VecStream::new(textbook_sample())), 8, 3, 1e-10, true)
                .unwrap();
        let report = check.run().unwrap();
        assert_eq!(report.outcomes.len(), 3 * Identity::iter().count());
        assert!(report.passed());
        assert_eq!(report.failures().count(), 0);
    }

    #[test]
    fn bariance_is_twice_unbiased_on_seeded_gamma_at_large_n() {
        let stream = Box::new(GammaGenerator::new(2.0, 2.0, Some(42)).unwrap());
        let mut check = IdentityCheck::new(stream, 10_000, 10, 1e-12, false).unwrap();
        let report = check.run().unwrap();
        assert!(report.passed(), "{:?}", report.failures().collect::<Vec<_>>());
        assert!(
            report
                .outcomes
                .iter()
                .all(|o| !o.identity.is_pairwise())
        );
        assert!(report.max_diff(Identity::BarianceIsTwiceUnbiased).unwrap() < 1e-12);
        assert!(report.max_diff(Identity::PairwiseIsTwiceUnbiased).is_none());
    }

    #[test]
    fn pairwise_identities_hold_on_moderate_gamma_samples() {
        let stream = Box::new(GammaGenerator::new(2.0, 2.0, Some(7)).unwrap());
        let mut check = IdentityCheck::new(stream, 500, 3, 1e-10, true)
            .unwrap()
            .with_pairwise_tolerance(1e-9);
        assert!(check.run().unwrap().passed());
    }

    #[test]
    fn impossible_tolerance_reports_failures() {
        // Values this far from zero make the raw-sum formulas lose digits.
        let values: Vec<f64> = (0..64).map(|i| 1.0e8 + 0.1 * i as f64).collect();
        let mut check =
            IdentityCheck::new(Box::new(VecStream::new(values)), 64, 1, 1e-300, false).unwrap();
        let report = check.run().unwrap();
        assert!(!report.passed());
        assert!(report.failures().count() > 0);
    }

    #[test]
    fn repeated_runs_replay_the_seeded_draws() {
        let stream = Box::new(GammaGenerator::new(2.0, 2.0, Some(42)).unwrap());
        let mut check = IdentityCheck::new(stream, 200, 3, 1e-10, true).unwrap();
        let first = check.run().unwrap();
        let second = check.run().unwrap();
        assert_eq!(first.outcomes, second.outcomes);
    }

    #[test]
    fn ctor_guards() {
        let s = || Box::new(VecStream::new(vec![1.0])) as Box<dyn SampleStream>;
        assert!(IdentityCheck::new(s(), 1, 1, 1e-10, false).is_err());
        assert!(IdentityCheck::new(s(), 2, 0, 1e-10, false).is_err());
        assert!(IdentityCheck::new(s(), 2, 1, 0.0, false).is_err());
        assert!(IdentityCheck::new(s(), 2, 1, f64::NAN, false).is_err());
    }

    #[test]
    fn sampling_failure_propagates() {
        let mut check = IdentityCheck::new(Box::new(ExhaustedStream), 8, 1, 1e-10, false).unwrap();
        assert!(matches!(check.run(), Err(TaskError::Sampling(_))));
    }
}
