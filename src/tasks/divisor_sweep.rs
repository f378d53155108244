use crate::estimators::{mean, sum_squared_deviations, unbiased_variance};
use crate::streams::SampleStream;
use crate::streams::generators::NormalGenerator;
use crate::tasks::TaskError;
use crate::utils::math::student_t_quantile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

pub const DIVISOR_SWEEP_HEADER: &str = "a,BiasSq,BiasSqLow,BiasSqHigh,Variance,VarianceLow,VarianceHigh,MSE,MSELow,MSEHigh";

/// Parameters of the MSE study of `sum((x - mean)^2) / a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisorSweepParams {
    pub sample_size: usize,
    pub true_variance: f64,
    pub simulations: usize,
    pub bootstrap_rounds: usize,
    pub divisors: Vec<f64>,
    pub seed: Option<u64>,
}

impl Default for DivisorSweepParams {
    fn default() -> Self {
        Self {
            sample_size: 5,
            true_variance: 10.0,
            simulations: 10_000,
            bootstrap_rounds: 200,
            divisors: divisor_grid(3.5, 8.5, 0.5),
            seed: Some(42),
        }
    }
}

/// Inclusive grid `start, start + step, ..., end`.
pub fn divisor_grid(start: f64, end: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || end < start {
        return Vec::new();
    }
    let steps = ((end - start) / step + 1e-9).floor() as usize;
    (0..=steps).map(|i| start + step * i as f64).collect()
}

/// Point estimate and 95% interval for one divisor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DivisorRow {
    pub a: f64,
    pub bias_sq: f64,
    pub bias_sq_ci: (f64, f64),
    pub variance: f64,
    pub variance_ci: (f64, f64),
    pub mse: f64,
    pub mse_ci: (f64, f64),
}

#[derive(Debug, Clone, Serialize)]
pub struct DivisorSweepReport {
    pub sample_size: usize,
    pub bootstrap_rounds: usize,
    pub seed: Option<u64>,
    pub rows: Vec<DivisorRow>,
}

impl DivisorSweepReport {
    /// Divisor with the smallest point MSE.
    pub fn best_divisor(&self) -> Option<f64> {
        self.rows
            .iter()
            .min_by(|a, b| a.mse.total_cmp(&b.mse))
            .map(|r| r.a)
    }

    pub fn row(&self, a: f64) -> Option<&DivisorRow> {
        self.rows.iter().find(|r| is_close(r.a, a))
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> Result<(), std::io::Error> {
        writeln!(out, "{DIVISOR_SWEEP_HEADER}")?;
        for r in &self.rows {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{},{},{}",
                r.a,
                r.bias_sq,
                r.bias_sq_ci.0,
                r.bias_sq_ci.1,
                r.variance,
                r.variance_ci.0,
                r.variance_ci.1,
                r.mse,
                r.mse_ci.0,
                r.mse_ci.1
            )?;
        }
        out.flush()
    }

    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        self.write_csv(BufWriter::new(File::create(path)?))
    }

    /// Booktabs table; rows for `a = n - 1`, `n` and `n + 1` are bold.
    pub fn to_latex(&self) -> String {
        let n = self.sample_size as f64;
        let seed = match self.seed {
            Some(s) => format!("seed={s}"),
            None => "unseeded".to_string(),
        };

        let mut s = String::new();
        s.push_str("\\begin{table}[h]\n\\centering\n");
        let _ = writeln!(
            s,
            "\\caption{{Empirical Bias$^2$, Variance, and MSE with 95\\% bootstrapped confidence intervals ({} resamples, {seed}). Bold rows indicate $a = n-1$, $n$, and $n+1$.}}",
            self.bootstrap_rounds
        );
        s.push_str("\\label{tab:empirical-mse-ci-bootstrap}\n");
        s.push_str("\\begin{tabular}{rccc}\n\\toprule\n");
        s.push_str("$a$ & Bias$^2$ [CI] & Variance [CI] & MSE [CI] \\\\\n\\midrule\n");
        for r in &self.rows {
            let bold = if [n - 1.0, n, n + 1.0].iter().any(|&b| is_close(r.a, b)) {
                "\\textbf"
            } else {
                ""
            };
            let _ = writeln!(
                s,
                "{bold}{{{:.1}}} & {bold}{{{:.2} [{:.2}, {:.2}]}} & {bold}{{{:.2} [{:.2}, {:.2}]}} & {bold}{{{:.2} [{:.2}, {:.2}]}} \\\\",
                r.a,
                r.bias_sq,
                r.bias_sq_ci.0,
                r.bias_sq_ci.1,
                r.variance,
                r.variance_ci.0,
                r.variance_ci.1,
                r.mse,
                r.mse_ci.0,
                r.mse_ci.1
            );
        }
        s.push_str("\\bottomrule\n\\end{tabular}\n\\end{table}\n");
        s
    }
}

/// Simulates `simulations` normal samples of size `sample_size` and, for each
/// divisor `a`, measures bias², variance and MSE of `SS / a` with bootstrap
/// confidence intervals over the simulated rows.
pub struct DivisorSweep {
    params: DivisorSweepParams,
    stream: Box<dyn SampleStream>,
    rng: StdRng,
}

impl DivisorSweep {
    pub fn new(params: DivisorSweepParams) -> Result<Self, TaskError> {
        if params.sample_size < 2 {
            return Err(TaskError::InvalidParameter(
                "sample_size must be >= 2".into(),
            ));
        }
        if params.simulations < 2 {
            return Err(TaskError::InvalidParameter(
                "simulations must be >= 2".into(),
            ));
        }
        if params.bootstrap_rounds < 2 {
            return Err(TaskError::InvalidParameter(
                "bootstrap_rounds must be >= 2".into(),
            ));
        }
        if params.divisors.is_empty() {
            return Err(TaskError::InvalidParameter(
                "at least one divisor is required".into(),
            ));
        }
        if let Some(a) = params.divisors.iter().find(|a| !(a.is_finite() && **a > 0.0)) {
            return Err(TaskError::InvalidParameter(format!(
                "divisors must be finite and > 0, got {a}"
            )));
        }

        let stream = NormalGenerator::new(0.0, params.true_variance.sqrt(), params.seed)
            .map_err(|e| TaskError::InvalidParameter(format!("true_variance: {e}")))?;
        // Resampling draws come from their own stream so the simulated rows
        // do not depend on the number of bootstrap rounds.
        let rng = match params.seed {
            Some(s) => StdRng::seed_from_u64(s.wrapping_add(1)),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            params,
            stream: Box::new(stream),
            rng,
        })
    }

    pub fn params(&self) -> &DivisorSweepParams {
        &self.params
    }

    pub fn run(&mut self) -> Result<DivisorSweepReport, TaskError> {
        let p = self.params.clone();
        info!(
            stream = %self.stream.describe(),
            sample_size = p.sample_size,
            simulations = p.simulations,
            bootstrap_rounds = p.bootstrap_rounds,
            "starting divisor sweep"
        );

        let mut sums = Vec::with_capacity(p.simulations);
        for _ in 0..p.simulations {
            let row = self.stream.take_samples(p.sample_size)?;
            sums.push(sum_squared_deviations(&row));
        }

        let t = student_t_quantile(0.975, (p.bootstrap_rounds - 1) as f64);
        let mut resampled = vec![0.0; p.simulations];
        let mut rows = Vec::with_capacity(p.divisors.len());

        for &a in &p.divisors {
            let estimates: Vec<f64> = sums.iter().map(|ss| ss / a).collect();
            let (bias_sq, variance, mse) = error_terms(&estimates, p.true_variance);

            let mut boot_bias_sq = Vec::with_capacity(p.bootstrap_rounds);
            let mut boot_variance = Vec::with_capacity(p.bootstrap_rounds);
            let mut boot_mse = Vec::with_capacity(p.bootstrap_rounds);
            for _ in 0..p.bootstrap_rounds {
                for slot in resampled.iter_mut() {
                    *slot = estimates[self.rng.random_range(0..p.simulations)];
                }
                let (b, v, m) = error_terms(&resampled, p.true_variance);
                boot_bias_sq.push(b);
                boot_variance.push(v);
                boot_mse.push(m);
            }

            let row = DivisorRow {
                a,
                bias_sq,
                bias_sq_ci: mean_ci(&boot_bias_sq, t),
                variance,
                variance_ci: mean_ci(&boot_variance, t),
                mse,
                mse_ci: mean_ci(&boot_mse, t),
            };
            debug!(a, bias_sq, variance, mse, "divisor done");
            rows.push(row);
        }

        let report = DivisorSweepReport {
            sample_size: p.sample_size,
            bootstrap_rounds: p.bootstrap_rounds,
            seed: p.seed,
            rows,
        };
        info!(best_divisor = ?report.best_divisor(), "divisor sweep complete");
        Ok(report)
    }
}

/// `(bias², variance, bias² + variance)` of a set of estimates.
fn error_terms(estimates: &[f64], truth: f64) -> (f64, f64, f64) {
    let bias = mean(estimates) - truth;
    let bias_sq = bias * bias;
    let variance = unbiased_variance(estimates);
    (bias_sq, variance, bias_sq + variance)
}

/// `mean +- se * t` over bootstrap replicates.
fn mean_ci(data: &[f64], t: f64) -> (f64, f64) {
    let m = mean(data);
    let h = (unbiased_variance(data) / data.len() as f64).sqrt() * t;
    (m - h, m + h)
}

fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}
