use crate::estimators::EstimatorKind;
use crate::evaluation::TableFormat;
use crate::ui::types::choices::{
    DistributionChoice, DivisorSweepChoiceParams, GammaParameters, IdentityCheckParams,
    NormalParameters, RuntimeBenchmarkParams, TaskChoice,
};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Ready-made task configurations matching the published experiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, Display, IntoStaticStr, EnumMessage)]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    #[strum(message = "N(0,1) unseeded, 9 sizes up to 5M, 100 trials")]
    NormalUnseeded,
    #[strum(message = "Gamma(2,2) seed 42, 9 sizes up to 500k, 1000 trials")]
    GammaSeeded,
    #[strum(message = "Gamma(2,2) seed 42, eight estimators incl. pairwise, 1000 trials")]
    GammaBigEight,
    #[strum(message = "Gamma(2,2) seed 42, n = 100k, 10k trials, streaming forms (BarianceOpt/AltBariance labels)")]
    FairGamma,
    #[strum(message = "Bariance == 2 * unbiased on Gamma(2,2), n = 10k")]
    IdentityCheck,
    #[strum(message = "MSE of SS / a for n = 5, a in 3.5..=8.5")]
    DivisorSweep,
}

impl Preset {
    pub fn task(self) -> TaskChoice {
        use EstimatorKind::*;

        let gamma = || DistributionChoice::Gamma(GammaParameters::default());
        let benchmark = |distribution: DistributionChoice,
                         sizes: &[usize],
                         trials: u64,
                         estimators: &[EstimatorKind],
                         output: &str| {
            TaskChoice::RuntimeBenchmark(RuntimeBenchmarkParams {
                distribution,
                sample_sizes: sizes.to_vec(),
                estimators: estimators.to_vec(),
                trials,
                output: output.to_string(),
                format: TableFormat::Csv,
            })
        };

        match self {
            Preset::NormalUnseeded => benchmark(
                DistributionChoice::Normal(NormalParameters::default()),
                &[1_000, 5_000, 10_000, 20_000, 100_000, 200_000, 400_000, 1_000_000, 5_000_000],
                100,
                &[Unbiased, BarianceOpt],
                "variance_bariance_runtime.csv",
            ),
            Preset::GammaSeeded => benchmark(
                gamma(),
                &[100, 500, 1_000, 2_000, 10_000, 20_000, 40_000, 100_000, 500_000],
                1_000,
                &[Unbiased, BarianceOpt],
                "variance_bariance_runtime_gamma_1k_trials.csv",
            ),
            Preset::GammaBigEight => benchmark(
                gamma(),
                &[100, 500, 1_000, 2_000, 3_000, 5_000],
                1_000,
                &[
                    Unbiased,
                    Biased,
                    BarianceOpt,
                    NaivePairwise,
                    UnbiasedPairwise,
                    BiasedPairwise,
                    PopulationVar,
                    AltBariance,
                ],
                "variance_estimators_gamma_big8_1ktrials_6samples.csv",
            ),
            Preset::FairGamma => benchmark(
                gamma(),
                &[100_000],
                10_000,
                &[UnbiasedOptim, BiasedOptim, PopulationOptim, BarianceOpt, AltBariance],
                "fair_variance_estimators_gamma_optimized.csv",
            ),
            Preset::IdentityCheck => TaskChoice::IdentityCheck(IdentityCheckParams {
                distribution: gamma(),
                sample_size: 10_000,
                checks: 10,
                tolerance: 1e-12,
                include_pairwise: false,
            }),
            Preset::DivisorSweep => TaskChoice::DivisorSweep(DivisorSweepChoiceParams::default()),
        }
    }
}
