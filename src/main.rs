//! `bariance` command line entry point.
//!
//! Picks a task from a JSON config, a named preset or the interactive
//! wizard, runs it and prints a summary followed by the machine report.

use anyhow::{Context, Result, bail};
use bariance::tasks::{DivisorSweepReport, IdentityReport};
use bariance::evaluation::RuntimeSummary;
use bariance::ui::cli::drivers::InquireDriver;
use bariance::ui::cli::wizard::prompt_choice;
use bariance::ui::types::build::{TaskReport, build_task};
use bariance::ui::types::choices::{Preset, TaskChoice};
use bariance::utils::system::SystemReport;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Variance estimator benchmarks
#[derive(Parser)]
#[command(name = "bariance")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task configuration as JSON (`{"type": ..., "params": {...}}`)
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Named preset, e.g. gamma-seeded or divisor-sweep
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Override the output file of the chosen task
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the chosen configuration as JSON before running
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let choice = select_task(&cli)?;
    if let Some(path) = &cli.save_config {
        let json = serde_json::to_string_pretty(&choice)?;
        std::fs::write(path, json + "\n")
            .with_context(|| format!("writing config to {}", path.display()))?;
        info!(path = %path.display(), "configuration saved");
    }

    let task = build_task(choice, cli.output.clone()).context("building task")?;
    let report = task.run().context("running task")?;

    let passed = match &report {
        TaskReport::RuntimeBenchmark(summary) => {
            info!(
                rows = summary.rows,
                seconds = summary.elapsed.as_secs_f64(),
                peak_rss_gb = ?summary.peak_rss_gb,
                "benchmark finished"
            );
            print_runtimes(&summary.runtimes);
            true
        }
        TaskReport::IdentityCheck(report) => print_identities(report),
        TaskReport::DivisorSweep(report) => {
            print_sweep(report);
            true
        }
    };

    println!("\n{}", SystemReport::collect());

    if !passed {
        bail!("estimator identities did not hold");
    }
    Ok(())
}

fn select_task(cli: &Cli) -> Result<TaskChoice> {
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()));
    }
    if let Some(preset) = cli.preset {
        info!(%preset, "using preset");
        return Ok(preset.task());
    }
    prompt_choice::<TaskChoice, _>(&InquireDriver)
}

fn print_runtimes(runtimes: &[RuntimeSummary]) {
    println!(
        "\n{:>10}  {:<18} {:>8} {:>14} {:>12} {:>12}",
        "SampleSize", "Estimator", "Trials", "MeanNs", "MinNs", "MaxNs"
    );
    for r in runtimes {
        println!(
            "{:>10}  {:<18} {:>8} {:>14.1} {:>12} {:>12}",
            r.sample_size,
            r.estimator.to_string(),
            r.trials,
            r.mean_ns,
            r.min_ns,
            r.max_ns
        );
    }
}

fn print_identities(report: &IdentityReport) -> bool {
    let failures: Vec<_> = report.failures().collect();
    println!(
        "\n{} identity evaluations, {} outside tolerance",
        report.outcomes.len(),
        failures.len()
    );
    for f in &failures {
        println!(
            "  check {}: {} |{} - {}| = {:e} > {:e}",
            f.check, f.identity, f.left, f.right, f.diff, f.tolerance
        );
    }
    failures.is_empty()
}

fn print_sweep(report: &DivisorSweepReport) {
    println!("\n{}", report.to_latex());
    if let Some(a) = report.best_divisor() {
        println!("Lowest MSE at a = {a:.1} (n = {})", report.sample_size);
    }
}
