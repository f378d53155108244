use crate::evaluation::{DelimitedRecorder, Recorder, TableExporter, TableFormat};
use crate::tasks::divisor_sweep::divisor_grid;
use crate::tasks::{
    BenchmarkSummary, DivisorSweep, DivisorSweepParams, DivisorSweepReport, IdentityCheck,
    IdentityReport, RuntimeBenchmark, TaskError, validate_benchmark,
};
use crate::ui::types::build::{BuildError, build_stream};
use crate::ui::types::choices::TaskChoice;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// A task ready to run, plus where its results go.
pub enum BuiltTask {
    RuntimeBenchmark {
        benchmark: RuntimeBenchmark,
        output: PathBuf,
    },
    IdentityCheck(IdentityCheck),
    DivisorSweep {
        sweep: DivisorSweep,
        output: PathBuf,
    },
}

pub enum TaskReport {
    RuntimeBenchmark(BenchmarkSummary),
    IdentityCheck(IdentityReport),
    DivisorSweep(DivisorSweepReport),
}

impl BuiltTask {
    pub fn output(&self) -> Option<&Path> {
        match self {
            BuiltTask::RuntimeBenchmark { output, .. } | BuiltTask::DivisorSweep { output, .. } => {
                Some(output.as_path())
            }
            BuiltTask::IdentityCheck(_) => None,
        }
    }

    pub fn run(self) -> Result<TaskReport, TaskError> {
        match self {
            BuiltTask::RuntimeBenchmark {
                mut benchmark,
                output,
            } => {
                let summary = benchmark.run()?;
                info!(path = %output.display(), rows = summary.rows, "timing rows written");
                Ok(TaskReport::RuntimeBenchmark(summary))
            }
            BuiltTask::IdentityCheck(mut check) => Ok(TaskReport::IdentityCheck(check.run()?)),
            BuiltTask::DivisorSweep { mut sweep, output } => {
                let report = sweep.run()?;
                report.export_csv(&output)?;
                let tex = output.with_extension("tex");
                std::fs::write(&tex, report.to_latex())?;
                info!(csv = %output.display(), latex = %tex.display(), "divisor sweep written");
                Ok(TaskReport::DivisorSweep(report))
            }
        }
    }
}

/// Turns a task choice into a runnable task. `output` overrides the path
/// stored in the choice; the table format then follows its extension.
pub fn build_task(choice: TaskChoice, output: Option<PathBuf>) -> Result<BuiltTask, BuildError> {
    match choice {
        TaskChoice::RuntimeBenchmark(p) => {
            let (path, format) = match output {
                Some(path) => {
                    let format = TableFormat::from_path(&path);
                    (path, format)
                }
                None => (PathBuf::from(p.output), p.format),
            };
            let stream = build_stream(p.distribution)?;
            // Opening the recorder truncates the output, so reject bad
            // parameters first.
            validate_benchmark(&p.estimators, &p.sample_sizes, p.trials)?;
            let recorder = open_recorder(&path, format)?;
            let benchmark =
                RuntimeBenchmark::new(stream, recorder, p.estimators, p.sample_sizes, p.trials)?;
            Ok(BuiltTask::RuntimeBenchmark {
                benchmark,
                output: path,
            })
        }
        TaskChoice::IdentityCheck(p) => {
            let stream = build_stream(p.distribution)?;
            let check = IdentityCheck::new(
                stream,
                to_usize(p.sample_size, "sample_size")?,
                to_usize(p.checks, "checks")?,
                p.tolerance,
                p.include_pairwise,
            )?;
            Ok(BuiltTask::IdentityCheck(check))
        }
        TaskChoice::DivisorSweep(p) => {
            let params = DivisorSweepParams {
                sample_size: to_usize(p.sample_size, "sample_size")?,
                true_variance: p.true_variance,
                simulations: to_usize(p.simulations, "simulations")?,
                bootstrap_rounds: to_usize(p.bootstrap_rounds, "bootstrap_rounds")?,
                divisors: divisor_grid(p.divisor_start, p.divisor_end, p.divisor_step),
                seed: p.seed,
            };
            Ok(BuiltTask::DivisorSweep {
                sweep: DivisorSweep::new(params)?,
                output: output.unwrap_or_else(|| PathBuf::from(p.output)),
            })
        }
    }
}

fn open_recorder(path: &Path, format: TableFormat) -> Result<Box<dyn Recorder>, BuildError> {
    Ok(match format {
        TableFormat::Csv => Box::new(DelimitedRecorder::csv_file(path)?),
        TableFormat::Tsv => Box::new(DelimitedRecorder::new(
            BufWriter::new(File::create(path)?),
            '\t',
        )?),
        TableFormat::Json => Box::new(TableExporter::new(path, TableFormat::Json)),
    })
}

fn to_usize(v: u64, name: &str) -> Result<usize, BuildError> {
    usize::try_from(v).map_err(|_| BuildError::InvalidParameter(format!("{name} too large for usize")))
}
