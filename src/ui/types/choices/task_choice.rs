use crate::estimators::EstimatorKind;
use crate::evaluation::TableFormat;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::prompt_choice;
use crate::ui::types::choices::{DistributionChoice, UIChoice};
use anyhow::{Context, Result, bail};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::str::FromStr;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RuntimeBenchmarkParams {
    #[schemars(skip)]
    pub distribution: DistributionChoice,
    #[schemars(skip)]
    pub sample_sizes: Vec<usize>,
    #[schemars(skip)]
    pub estimators: Vec<EstimatorKind>,

    #[schemars(
        title = "Trials",
        description = "Fresh samples drawn per sample size",
        range(min = 1)
    )]
    pub trials: u64,

    #[schemars(title = "Output File", description = "Where the timing rows are written")]
    pub output: String,

    #[serde(default)]
    #[schemars(title = "Format", description = "csv, tsv or json")]
    pub format: TableFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityCheckParams {
    #[schemars(skip)]
    pub distribution: DistributionChoice,

    #[schemars(
        title = "Sample Size",
        description = "Values drawn per check",
        range(min = 2)
    )]
    pub sample_size: u64,

    #[schemars(title = "Checks", description = "Independent draws to verify", range(min = 1))]
    pub checks: u64,

    #[schemars(
        title = "Tolerance",
        description = "Largest accepted absolute difference",
        range(min = 0.0)
    )]
    pub tolerance: f64,

    #[serde(default)]
    #[schemars(
        title = "Include Pairwise",
        description = "Also check the O(n^2) pairwise identities?"
    )]
    pub include_pairwise: bool,
}

fn default_sweep_seed() -> Option<u64> {
    Some(42)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DivisorSweepChoiceParams {
    #[schemars(title = "Sample Size", description = "Values per simulated sample", range(min = 2))]
    pub sample_size: u64,

    #[schemars(
        title = "True Variance",
        description = "Variance of the simulated normal population",
        range(min = 0.0)
    )]
    pub true_variance: f64,

    #[schemars(title = "Simulations", description = "Simulated samples", range(min = 2))]
    pub simulations: u64,

    #[schemars(
        title = "Bootstrap Rounds",
        description = "Resamples used for the confidence intervals",
        range(min = 2)
    )]
    pub bootstrap_rounds: u64,

    #[schemars(title = "First Divisor", range(min = 0.0))]
    pub divisor_start: f64,

    #[schemars(title = "Last Divisor", range(min = 0.0))]
    pub divisor_end: f64,

    #[schemars(title = "Divisor Step", range(min = 0.0))]
    pub divisor_step: f64,

    #[serde(default = "default_sweep_seed")]
    #[schemars(title = "Seed", description = "PRNG seed (None = OS entropy)")]
    pub seed: Option<u64>,

    #[schemars(
        title = "Output File",
        description = "CSV path; a .tex table is written next to it"
    )]
    pub output: String,
}

impl Default for DivisorSweepChoiceParams {
    fn default() -> Self {
        Self {
            sample_size: 5,
            true_variance: 10.0,
            simulations: 10_000,
            bootstrap_rounds: 200,
            divisor_start: 3.5,
            divisor_end: 8.5,
            divisor_step: 0.5,
            seed: default_sweep_seed(),
            output: "divisor_sweep.csv".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Runtime Benchmark",
        detailed_message = "Time estimators over fresh samples for each size and trial."
    ))]
    RuntimeBenchmark(RuntimeBenchmarkParams),

    #[strum_discriminants(strum(
        message = "Identity Check",
        detailed_message = "Verify that bariance and friends agree with the unbiased variance."
    ))]
    IdentityCheck(IdentityCheckParams),

    #[strum_discriminants(strum(
        message = "Divisor Sweep",
        detailed_message = "Bias, variance and MSE of SS / a with bootstrapped intervals."
    ))]
    DivisorSweep(DivisorSweepChoiceParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::RuntimeBenchmark => json!({
                "trials": 100,
                "output": "variance_runtime.csv",
                "format": "csv",
            }),
            TaskKind::IdentityCheck => json!({
                "sample_size": 10_000,
                "checks": 10,
                "tolerance": 1e-12,
                "include_pairwise": false,
            }),
            TaskKind::DivisorSweep => {
                serde_json::to_value(DivisorSweepChoiceParams::default()).unwrap_or_default()
            }
        }
    }

    fn subprompts<D: PromptDriver>(driver: &D, kind: Self::Kind) -> Result<Option<Map<String, Value>>> {
        match kind {
            TaskKind::RuntimeBenchmark => {
                let distribution = prompt_choice::<DistributionChoice, _>(driver)?;
                let sizes = driver.ask_string(
                    "Sample Sizes",
                    "Comma-separated, each >= 2",
                    "100,500,1000,2000,10000",
                )?;
                let estimators = driver.ask_string(
                    "Estimators",
                    "Comma-separated estimator labels, e.g. Unbiased,BarianceOpt",
                    "Unbiased,BarianceOpt",
                )?;

                let mut m = Map::new();
                m.insert("distribution".into(), serde_json::to_value(distribution)?);
                m.insert("sample_sizes".into(), serde_json::to_value(parse_sample_sizes(&sizes)?)?);
                m.insert("estimators".into(), serde_json::to_value(parse_estimators(&estimators)?)?);
                Ok(Some(m))
            }
            TaskKind::IdentityCheck => {
                let distribution = prompt_choice::<DistributionChoice, _>(driver)?;
                let mut m = Map::new();
                m.insert("distribution".into(), serde_json::to_value(distribution)?);
                Ok(Some(m))
            }
            TaskKind::DivisorSweep => Ok(None),
        }
    }

    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        Ok(match kind {
            TaskKind::RuntimeBenchmark => TaskChoice::RuntimeBenchmark(serde_json::from_value(params)?),
            TaskKind::IdentityCheck => TaskChoice::IdentityCheck(serde_json::from_value(params)?),
            TaskKind::DivisorSweep => TaskChoice::DivisorSweep(serde_json::from_value(params)?),
        })
    }
}

/// Parses `"100, 500,1000"` into sizes.
pub fn parse_sample_sizes(text: &str) -> Result<Vec<usize>> {
    let sizes = split_list(text)
        .map(|s| {
            s.replace('_', "")
                .parse::<usize>()
                .with_context(|| format!("invalid sample size '{s}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    if sizes.is_empty() {
        bail!("at least one sample size is required");
    }
    Ok(sizes)
}

/// Parses comma-separated estimator labels such as `Unbiased,BarianceOpt`.
pub fn parse_estimators(text: &str) -> Result<Vec<EstimatorKind>> {
    let kinds = split_list(text)
        .map(|s| EstimatorKind::from_str(s).with_context(|| format!("unknown estimator '{s}'")))
        .collect::<Result<Vec<_>>>()?;
    if kinds.is_empty() {
        bail!("at least one estimator is required");
    }
    Ok(kinds)
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{GammaParameters, specs_for_kind};
    use strum::EnumMessage;

    #[test]
    fn sample_sizes_accept_spaces_and_underscores() {
        assert_eq!(
            parse_sample_sizes(" 100, 1_000 ,5000,").unwrap(),
            vec![100, 1000, 5000]
        );
        assert!(parse_sample_sizes("").is_err());
        assert!(parse_sample_sizes("10,abc").is_err());
    }

    #[test]
    fn estimators_use_csv_labels() {
        assert_eq!(
            parse_estimators("Unbiased, BarianceOpt").unwrap(),
            vec![EstimatorKind::Unbiased, EstimatorKind::BarianceOpt]
        );
        let err = parse_estimators("Unbiased,Bariance").unwrap_err();
        assert!(err.to_string().contains("unknown estimator 'Bariance'"));
        assert!(parse_estimators(" , ").is_err());
    }

    #[test]
    fn runtime_benchmark_round_trips_through_json() {
        let choice = TaskChoice::RuntimeBenchmark(RuntimeBenchmarkParams {
            distribution: DistributionChoice::Gamma(GammaParameters::default()),
            sample_sizes: vec![100, 500],
            estimators: vec![EstimatorKind::Unbiased, EstimatorKind::BarianceOpt],
            trials: 10,
            output: "out.csv".into(),
            format: TableFormat::Csv,
        });
        let v = serde_json::to_value(&choice).unwrap();
        assert_eq!(v["type"], "runtime-benchmark");
        assert_eq!(v["params"]["estimators"], json!(["Unbiased", "BarianceOpt"]));
        assert_eq!(v["params"]["distribution"]["type"], "gamma");
        let back: TaskChoice = serde_json::from_value(v).unwrap();
        assert_eq!(back, choice);
    }

    #[test]
    fn wizard_fields_skip_subprompted_params() {
        let schema = TaskChoice::schema();
        let specs = specs_for_kind(&schema, "runtime-benchmark").unwrap();
        let names: Vec<_> = specs.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"trials"));
        assert!(names.contains(&"output"));
        assert!(!names.contains(&"distribution"));
        assert!(!names.contains(&"sample_sizes"));

        let trials = specs.iter().find(|s| s.name == "trials").unwrap();
        assert_eq!(trials.title, "Trials");
        assert!(trials.required);
    }

    #[test]
    fn divisor_sweep_defaults_rebuild() {
        let v = <TaskChoice as UIChoice>::default_params(TaskKind::DivisorSweep);
        let rebuilt = <TaskChoice as UIChoice>::from_parts(TaskKind::DivisorSweep, v).unwrap();
        assert_eq!(
            rebuilt,
            TaskChoice::DivisorSweep(DivisorSweepChoiceParams::default())
        );
    }

    #[test]
    fn discriminant_messages_available() {
        assert_eq!(TaskKind::IdentityCheck.get_message(), Some("Identity Check"));
        assert_eq!(TaskKind::DivisorSweep.to_string(), "divisor-sweep");
    }
}
