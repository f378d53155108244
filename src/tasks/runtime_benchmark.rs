use crate::estimators::EstimatorKind;
use crate::evaluation::{Recorder, RuntimeSummaries, RuntimeSummary, TimingRecord, TrialProgress};
use crate::streams::SampleStream;
use crate::tasks::TaskError;
use crate::utils::system::current_rss_gb;
use std::hint::black_box;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Outcome of a completed benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkSummary {
    pub rows: u64,
    pub elapsed: Duration,
    pub peak_rss_gb: Option<f64>,
    pub runtimes: Vec<RuntimeSummary>,
}

/// Checks the parameters [`RuntimeBenchmark::new`] would reject, so callers
/// can validate before creating any output.
pub fn validate_benchmark(
    estimators: &[EstimatorKind],
    sample_sizes: &[usize],
    trials: u64,
) -> Result<(), TaskError> {
    if estimators.is_empty() {
        return Err(TaskError::InvalidParameter(
            "at least one estimator is required".into(),
        ));
    }
    if sample_sizes.is_empty() {
        return Err(TaskError::InvalidParameter(
            "at least one sample size is required".into(),
        ));
    }
    if let Some(n) = sample_sizes.iter().find(|&&n| n < 2) {
        return Err(TaskError::InvalidParameter(format!(
            "sample sizes must be >= 2, got {n}"
        )));
    }
    if trials == 0 {
        return Err(TaskError::InvalidParameter("trials must be > 0".into()));
    }

    Ok(())
}

/// Sizes above this make a quadratic estimator dominate the run.
pub const QUADRATIC_WARN_SIZE: usize = 20_000;

/// Times each estimator on freshly drawn samples for every
/// `(sample size, trial)` pair and streams one row per call to a recorder.
///
/// Sample generation is never timed; only the estimator call is.
pub struct RuntimeBenchmark<R: Recorder = Box<dyn Recorder>> {
    stream: Box<dyn SampleStream>,
    recorder: R,
    estimators: Vec<EstimatorKind>,
    sample_sizes: Vec<usize>,
    trials: u64,
    progress_every: u64,

    rows: u64,
    start_time: Instant,
    peak_rss_gb: Option<f64>,
    summaries: RuntimeSummaries,

    progress_tx: Option<Sender<TrialProgress>>,
}

impl<R: Recorder> RuntimeBenchmark<R> {
    pub fn new(
        stream: Box<dyn SampleStream>,
        recorder: R,
        estimators: Vec<EstimatorKind>,
        sample_sizes: Vec<usize>,
        trials: u64,
    ) -> Result<Self, TaskError> {
        validate_benchmark(&estimators, &sample_sizes, trials)?;

        Ok(Self {
            stream,
            recorder,
            estimators,
            sample_sizes,
            trials,
            progress_every: (trials / 10).max(1),
            rows: 0,
            start_time: Instant::now(),
            peak_rss_gb: None,
            summaries: RuntimeSummaries::default(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<TrialProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn into_recorder(self) -> R {
        self.recorder
    }

    /// `(sample size, estimator)` pairs where a pairwise estimator meets a
    /// size above [`QUADRATIC_WARN_SIZE`].
    pub fn quadratic_workloads(&self) -> Vec<(usize, EstimatorKind)> {
        self.sample_sizes
            .iter()
            .filter(|&&n| n > QUADRATIC_WARN_SIZE)
            .flat_map(|&n| {
                self.estimators
                    .iter()
                    .filter(|e| e.is_quadratic())
                    .map(move |&e| (n, e))
            })
            .collect()
    }

    /// Restarts the stream first, so a seeded benchmark replays the same
    /// samples on every run.
    pub fn run(&mut self) -> Result<BenchmarkSummary, TaskError> {
        self.stream.restart();
        for (sample_size, estimator) in self.quadratic_workloads() {
            warn!(sample_size, %estimator, "pairwise estimator on a large sample, expect a long run");
        }

        self.start_time = Instant::now();
        self.rows = 0;
        self.summaries = RuntimeSummaries::default();

        info!(
            stream = %self.stream.describe(),
            trials = self.trials,
            sizes = ?self.sample_sizes,
            "starting runtime benchmark"
        );

        let sample_sizes = self.sample_sizes.clone();
        for n in sample_sizes {
            let size_start = Instant::now();
            info!(sample_size = n, "starting sample size");

            for t in 0..self.trials {
                let data = self.stream.take_samples(n)?;
                for &estimator in &self.estimators {
                    let record = TimingRecord {
                        sample_size: n,
                        trial: t,
                        estimator,
                        runtime_ns: time_estimator(estimator, &data),
                    };
                    self.recorder.record(&record)?;
                    self.summaries.add(&record);
                    self.rows += 1;
                }

                if t > 0 && t % self.progress_every == 0 {
                    self.report_progress(n, t);
                }
            }

            self.bump_peak_rss();
            self.report_progress(n, self.trials);
            info!(
                sample_size = n,
                elapsed_ms = size_start.elapsed().as_millis() as u64,
                "completed sample size"
            );
        }

        self.recorder.finish()?;

        let summary = BenchmarkSummary {
            rows: self.rows,
            elapsed: self.start_time.elapsed(),
            peak_rss_gb: self.peak_rss_gb,
            runtimes: std::mem::take(&mut self.summaries).into_vec(),
        };
        info!(
            rows = summary.rows,
            seconds = summary.elapsed.as_secs_f64(),
            "benchmark complete"
        );
        Ok(summary)
    }

    fn report_progress(&self, sample_size: usize, trials_done: u64) {
        let progress = TrialProgress {
            sample_size,
            trials_done,
            trials_total: self.trials,
            seconds: self.start_time.elapsed().as_secs_f64(),
        };
        debug!(%progress, "trial progress");

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(progress);
        }
    }

    fn bump_peak_rss(&mut self) {
        if let Some(rss) = current_rss_gb() {
            self.peak_rss_gb = Some(self.peak_rss_gb.map_or(rss, |p| p.max(rss)));
        }
    }
}

/// Wall-clock nanoseconds of a single estimator call.
#[inline(never)]
fn time_estimator(estimator: EstimatorKind, data: &[f64]) -> u64 {
    let f = estimator.function();
    let start = Instant::now();
    let value = f(black_box(data));
    let elapsed = start.elapsed();
    black_box(value);
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}
