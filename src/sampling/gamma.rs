use crate::sampling::{RandomSource, SamplingError};

/// Upper bound on rejection rounds for a single variate.
///
/// Both branches accept with high probability on every round, so reaching
/// the cap means the parameters or the source are broken.
pub const MAX_REJECTION_ATTEMPTS: usize = 10_000;

/// Draws one Gamma(`shape`, `scale`) variate.
///
/// `shape < 1` uses a Johnk-style rejection on `z = -ln(u)`; `shape >= 1`
/// (including exactly 1) uses Marsaglia and Tsang's squeeze method. The
/// parameters are not validated: non-positive or non-finite values flow
/// through the arithmetic and surface as NaN or infinite results.
///
/// The output is a deterministic function of the draws taken from `source`,
/// so identically seeded sources yield bit-identical variate sequences.
pub fn sample_gamma<R: RandomSource + ?Sized>(
    source: &mut R,
    shape: f64,
    scale: f64,
) -> Result<f64, SamplingError> {
    if shape < 1.0 {
        sample_small_shape(source, shape, scale)
    } else {
        sample_marsaglia_tsang(source, shape, scale)
    }
}

fn sample_small_shape<R: RandomSource + ?Sized>(
    source: &mut R,
    shape: f64,
    scale: f64,
) -> Result<f64, SamplingError> {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let u = source.next_uniform();
        let v = source.next_uniform();
        let z = -u.ln();
        if v <= z.powf(shape - 1.0) * (-z).exp() {
            return Ok(scale * z);
        }
    }
    Err(SamplingError::RejectionLimitExceeded {
        shape,
        attempts: MAX_REJECTION_ATTEMPTS,
    })
}

fn sample_marsaglia_tsang<R: RandomSource + ?Sized>(
    source: &mut R,
    shape: f64,
    scale: f64,
) -> Result<f64, SamplingError> {
    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let x = source.next_gaussian();
        let v = 1.0 + c * x;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = source.next_uniform();

        // squeeze
        if u < 1.0 - 0.0331 * x * x * x * x {
            return Ok(scale * d * v);
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return Ok(scale * d * v);
        }
    }
    Err(SamplingError::RejectionLimitExceeded {
        shape,
        attempts: MAX_REJECTION_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Replays a fixed script of uniform and normal draws.
    struct ScriptedSource {
        uniforms: Vec<f64>,
        gaussians: Vec<f64>,
    }

    impl RandomSource for ScriptedSource {
        fn next_uniform(&mut self) -> f64 {
            self.uniforms.remove(0)
        }

        fn next_gaussian(&mut self) -> f64 {
            self.gaussians.remove(0)
        }
    }

    /// Always proposes a value the Marsaglia-Tsang branch rejects.
    struct StuckSource;

    impl RandomSource for StuckSource {
        fn next_uniform(&mut self) -> f64 {
            0.5
        }

        fn next_gaussian(&mut self) -> f64 {
            -1.0e6
        }
    }

    fn mean_and_variance(xs: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
        (mean, var)
    }

    #[test]
    fn every_call_terminates_with_finite_positive_value() {
        for shape in [0.5, 2.0, 5.0] {
            let mut rng = StdRng::seed_from_u64(42);
            for i in 0..10_000 {
                let x = sample_gamma(&mut rng, shape, 2.0).unwrap();
                assert!(x.is_finite() && x > 0.0, "shape={shape} draw={i} x={x}");
            }
        }
    }

    #[test]
    fn seeded_sources_give_bit_identical_sequences() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let x = sample_gamma(&mut a, 2.0, 2.0).unwrap();
            let y = sample_gamma(&mut b, 2.0, 2.0).unwrap();
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn marsaglia_tsang_moments_match_gamma_two_two() {
        // Gamma(k=2, theta=2): mean = 4, variance = 8.
        let mut rng = StdRng::seed_from_u64(2025);
        let xs: Vec<f64> = (0..100_000)
            .map(|_| sample_gamma(&mut rng, 2.0, 2.0).unwrap())
            .collect();
        let (mean, var) = mean_and_variance(&xs);
        assert!((mean - 4.0).abs() < 0.05, "mean={mean}");
        assert!((var - 8.0).abs() < 0.3, "var={var}");
    }

    #[test]
    fn shape_one_goes_through_marsaglia_tsang() {
        // d = 2/3, c = 1/sqrt(6); x = 0 gives v = 1 and the squeeze accepts.
        let mut source = ScriptedSource {
            uniforms: vec![0.5],
            gaussians: vec![0.0],
        };
        let x = sample_gamma(&mut source, 1.0, 3.0).unwrap();
        assert!((x - 3.0 * (2.0 / 3.0)).abs() < 1e-15, "x={x}");
        assert!(source.uniforms.is_empty() && source.gaussians.is_empty());
    }

    #[test]
    fn marsaglia_tsang_redraws_on_non_positive_v() {
        // c = 1/sqrt(9 * (5/3)) ~= 0.258; x = -10 makes 1 + c*x negative.
        let mut source = ScriptedSource {
            uniforms: vec![0.1],
            gaussians: vec![-10.0, 0.0],
        };
        let x = sample_gamma(&mut source, 2.0, 1.0).unwrap();
        assert!((x - 5.0 / 3.0).abs() < 1e-15, "x={x}");
    }

    #[test]
    fn small_shape_accepts_scaled_negative_log() {
        // u = e^-1 gives z = 1, threshold = 1^(s-1) * e^-1 ~= 0.368.
        let u = (-1.0f64).exp();
        let mut source = ScriptedSource {
            uniforms: vec![u, 0.3],
            gaussians: vec![],
        };
        let x = sample_gamma(&mut source, 0.5, 4.0).unwrap();
        assert!((x - 4.0).abs() < 1e-12, "x={x}");
    }

    #[test]
    fn small_shape_rejects_then_accepts() {
        let u = (-1.0f64).exp();
        let mut source = ScriptedSource {
            uniforms: vec![u, 0.9, u, 0.1],
            gaussians: vec![],
        };
        let x = sample_gamma(&mut source, 0.5, 1.0).unwrap();
        assert!((x - 1.0).abs() < 1e-12, "x={x}");
        assert!(source.uniforms.is_empty());
    }

    #[test]
    fn rejection_cap_surfaces_as_error() {
        let err = sample_gamma(&mut StuckSource, 3.0, 1.0).unwrap_err();
        assert_eq!(
            err,
            SamplingError::RejectionLimitExceeded {
                shape: 3.0,
                attempts: MAX_REJECTION_ATTEMPTS
            }
        );
    }

    #[test]
    fn invalid_scale_propagates_instead_of_failing() {
        let mut rng = StdRng::seed_from_u64(1);
        let x = sample_gamma(&mut rng, 2.0, f64::NAN).unwrap();
        assert!(x.is_nan());
    }
}
