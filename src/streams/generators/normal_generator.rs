use std::io::{Error, ErrorKind};

use rand::rngs::StdRng;

use crate::sampling::{SamplingError, sample_normal};
use crate::streams::generators::gamma_generator::make_rng;
use crate::streams::stream::SampleStream;

/// Unbounded stream of `N(mean, std_dev^2)` deviates.
#[derive(Debug)]
pub struct NormalGenerator {
    seed: Option<u64>,
    rng: StdRng,
    mean: f64,
    std_dev: f64,
}

impl NormalGenerator {
    pub fn new(mean: f64, std_dev: f64, seed: Option<u64>) -> Result<Self, Error> {
        if !mean.is_finite() {
            return Err(Error::new(ErrorKind::InvalidInput, "mean must be finite"));
        }
        if !(std_dev.is_finite() && std_dev > 0.0) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "std_dev must be finite and > 0",
            ));
        }
        Ok(Self {
            seed,
            rng: make_rng(seed),
            mean,
            std_dev,
        })
    }

    pub fn standard(seed: Option<u64>) -> Self {
        Self {
            seed,
            rng: make_rng(seed),
            mean: 0.0,
            std_dev: 1.0,
        }
    }
}

impl SampleStream for NormalGenerator {
    fn describe(&self) -> String {
        let seed = match self.seed {
            Some(s) => format!("seed={s}"),
            None => "unseeded".to_string(),
        };
        format!("Normal(mean={}, std_dev={}), {seed}", self.mean, self.std_dev)
    }

    fn next_sample(&mut self) -> Result<f64, SamplingError> {
        Ok(sample_normal(&mut self.rng, self.mean, self.std_dev))
    }

    fn restart(&mut self) {
        self.rng = make_rng(self.seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::math::normal_probability;

    #[test]
    fn restart_resets_sequence_with_same_seed() {
        let mut generator = NormalGenerator::new(1.0, 2.0, Some(99)).unwrap();
        let first = generator.take_samples(30).unwrap();
        generator.restart();
        assert_eq!(first, generator.take_samples(30).unwrap());
    }

    #[test]
    fn empirical_cdf_is_close_to_standard_normal() {
        let mut generator = NormalGenerator::standard(Some(2025));
        let mut xs = generator.take_samples(20_000).unwrap();
        xs.sort_by(|a, b| a.total_cmp(b));

        let n = xs.len() as f64;
        let ks = xs
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let cdf = normal_probability(x);
                let lo = (cdf - i as f64 / n).abs();
                let hi = ((i + 1) as f64 / n - cdf).abs();
                lo.max(hi)
            })
            .fold(0.0, f64::max);

        // 1.95 / sqrt(n): 0.1% critical value of the KS statistic
        assert!(ks < 1.95 / n.sqrt(), "ks={ks}");
    }

    #[test]
    fn shifted_and_scaled_moments() {
        let mut generator = NormalGenerator::new(0.0, 10f64.sqrt(), Some(42)).unwrap();
        let xs = generator.take_samples(50_000).unwrap();
        let mean = crate::estimators::mean(&xs);
        let var = crate::estimators::unbiased_variance(&xs);
        assert!(mean.abs() < 0.1, "mean={mean}");
        assert!((var - 10.0).abs() < 0.3, "var={var}");
    }

    #[test]
    fn describe_mentions_seed() {
        assert_eq!(
            NormalGenerator::standard(None).describe(),
            "Normal(mean=0, std_dev=1), unseeded"
        );
        assert_eq!(
            NormalGenerator::standard(Some(7)).describe(),
            "Normal(mean=0, std_dev=1), seed=7"
        );
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert_eq!(
            NormalGenerator::new(0.0, 0.0, None).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            NormalGenerator::new(f64::NAN, 1.0, None).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
}
