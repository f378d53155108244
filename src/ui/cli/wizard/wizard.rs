use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, FieldSpec, UIChoice, specs_for_kind};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

struct KindItem<K> {
    kind: K,
    text: String,
}

fn kind_items<K>() -> Vec<KindItem<K>>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let desc = k.get_detailed_message().unwrap_or("");
            let text = if desc.is_empty() {
                label.to_string()
            } else {
                format!("{label}  {DIM_ITALIC}{desc}{RESET}")
            };
            KindItem { kind: k, text }
        })
        .collect()
}

/// Asks for a variant of `C`, then for each of its schema fields, then for
/// anything `C::subprompts` collects.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let items = kind_items::<C::Kind>();
    let labels: Vec<String> = items.iter().map(|i| i.text.clone()).collect();

    let picked = driver.ask_select(
        C::prompt_label(),
        C::prompt_help().unwrap_or(""),
        &labels,
        "",
    )?;
    let choice_kind: C::Kind = items
        .iter()
        .find(|i| i.text == picked)
        .map(|i| i.kind)
        .with_context(|| format!("unknown selection '{picked}'"))?;

    let key: &'static str = choice_kind.into();
    let schema = C::schema();
    let specs = specs_for_kind(&schema, key)?;

    let defaults = C::default_params(choice_kind);

    let mut params = Map::new();
    for spec in &specs {
        let init = spec
            .default
            .clone()
            .or_else(|| defaults.get(&spec.name).cloned());
        if let Some(val) = ask_field(driver, spec, init)? {
            params.insert(spec.name.clone(), val);
        }
    }

    if let Some(extra) = C::subprompts(driver, choice_kind)? {
        params.extend(extra);
    }
    C::from_parts(choice_kind, Value::Object(params))
}

/// Prompts for one field. Returns `None` only for an optional number left
/// blank, so serde falls back to the field's default.
fn ask_field<D: PromptDriver>(driver: &D, spec: &FieldSpec, init: Option<Value>) -> Result<Option<Value>> {
    let help = spec.description.as_deref().unwrap_or("");
    let numeric = matches!(spec.kind, FieldKind::Integer | FieldKind::Number);
    if numeric && !spec.required && matches!(init, None | Some(Value::Null)) {
        return ask_optional_number(driver, spec, help);
    }

    let value = match spec.kind {
        FieldKind::Boolean => {
            let def = init.and_then(|v| v.as_bool()).unwrap_or(false);
            Value::Bool(driver.ask_bool(&spec.title, help, def)?)
        }
        FieldKind::String => {
            let def = init
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Value::String(if !spec.options.is_empty() {
                driver.ask_select(&spec.title, help, &spec.options, &def)?
            } else if spec.name == "output" {
                let help = if help.is_empty() {
                    "Please type a .csv, .tsv or .json file path"
                } else {
                    help
                };
                prompt_output_path(driver, &spec.title, help, &def, &["csv", "tsv", "json"])?
                    .to_string_lossy()
                    .into_owned()
            } else {
                driver.ask_string(&spec.title, help, &def)?
            })
        }
        FieldKind::Integer => {
            let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
            Value::from(driver.ask_u64(
                &spec.title,
                help,
                def,
                spec.min.map(|x| x as u64),
                spec.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Value::from(driver.ask_f64(&spec.title, help, def, spec.min, spec.max)?)
        }
    };
    Ok(Some(value))
}

fn ask_optional_number<D: PromptDriver>(driver: &D, spec: &FieldSpec, help: &str) -> Result<Option<Value>> {
    let answer = driver.ask_string(&spec.title, &format!("{help}\n(leave blank for none)"), "")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let value = if spec.kind == FieldKind::Integer {
        let n: u64 = answer
            .parse()
            .with_context(|| format!("invalid integer for {}", spec.title))?;
        Value::from(n)
    } else {
        let x: f64 = answer
            .parse()
            .with_context(|| format!("invalid number for {}", spec.title))?;
        Value::from(x)
    };
    Ok(Some(value))
}

/// An output file: non-empty, not a directory, in an existing directory,
/// with one of `allowed_exts`.
fn validate_output_path(input: &str, allowed_exts: &[&str]) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Path cannot be empty".into());
    }
    let p = Path::new(trimmed);

    if p.is_dir() {
        return Err("Expected a file path, not a directory".into());
    }
    if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(format!("Directory does not exist: {}", parent.display()));
        }
    }
    match p.extension().and_then(|e| e.to_str()) {
        Some(ext) if allowed_exts.iter().any(|e| e.eq_ignore_ascii_case(ext)) => Ok(()),
        _ => Err(format!("Expected a .{} file", allowed_exts.join(" / ."))),
    }
}

fn prompt_output_path<D: PromptDriver>(
    driver: &D,
    title: &str,
    help: &str,
    default: &str,
    allowed_exts: &[&str],
) -> Result<PathBuf> {
    loop {
        let answer = driver.ask_string(title, help, default)?;
        match validate_output_path(&answer, allowed_exts) {
            Ok(()) => return Ok(PathBuf::from(answer.trim())),
            Err(msg) => {
                eprintln!("✗ {}", msg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedDriver;
    use crate::ui::types::choices::{
        DistributionChoice, DivisorSweepChoiceParams, GammaParameters, NormalParameters,
        TaskChoice,
    };

    const TABLES: &[&str] = &["csv", "tsv", "json"];

    #[test]
    fn output_path_needs_a_known_extension() {
        assert!(validate_output_path("runtime.csv", TABLES).is_ok());
        assert!(validate_output_path("runtime.TSV", TABLES).is_ok());
        let err = validate_output_path("runtime.txt", TABLES).unwrap_err();
        assert_eq!(err, "Expected a .csv / .tsv / .json file");
        assert!(validate_output_path("   ", TABLES).is_err());
    }

    #[test]
    fn output_parent_directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("rows.csv");
        assert!(validate_output_path(ok.to_str().unwrap(), TABLES).is_ok());

        let missing = dir.path().join("nope").join("rows.csv");
        let err = validate_output_path(missing.to_str().unwrap(), TABLES).unwrap_err();
        assert!(err.starts_with("Directory does not exist"));
    }

    #[test]
    fn existing_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let as_csv = dir.path().join("looks.csv");
        std::fs::create_dir(&as_csv).unwrap();
        let err = validate_output_path(as_csv.to_str().unwrap(), TABLES).unwrap_err();
        assert_eq!(err, "Expected a file path, not a directory");
    }

    #[test]
    fn gamma_choice_takes_answers_and_defaults() {
        let driver = ScriptedDriver::new(["Gamma", "3.5", "", "7"]);
        let choice: DistributionChoice = prompt_choice(&driver).unwrap();
        assert_eq!(
            choice,
            DistributionChoice::Gamma(GammaParameters {
                shape: 3.5,
                scale: 2.0,
                seed: Some(7),
            })
        );
        assert_eq!(driver.remaining(), 0);
    }

    #[test]
    fn blank_optional_seed_means_unseeded() {
        let driver = ScriptedDriver::new(["Normal", "", "", ""]);
        let choice: DistributionChoice = prompt_choice(&driver).unwrap();
        assert_eq!(choice, DistributionChoice::Normal(NormalParameters::default()));
    }

    #[test]
    fn divisor_sweep_accepts_every_default() {
        let driver = ScriptedDriver::new(["Divisor Sweep"].into_iter().chain(std::iter::repeat_n("", 9)));
        let choice: TaskChoice = prompt_choice(&driver).unwrap();
        assert_eq!(choice, TaskChoice::DivisorSweep(DivisorSweepChoiceParams::default()));
    }

    #[test]
    fn benchmark_subprompts_collect_lists() {
        let driver = ScriptedDriver::new([
            "Runtime Benchmark",
            // trials, output, format
            "5",
            "",
            "tsv",
            // distribution
            "Normal",
            "",
            "",
            "11",
            // sizes, estimators
            "10, 20",
            "AltBariance",
        ]);
        let TaskChoice::RuntimeBenchmark(p) = prompt_choice::<TaskChoice, _>(&driver).unwrap() else {
            panic!("expected a runtime benchmark");
        };
        assert_eq!(p.trials, 5);
        assert_eq!(p.output, "variance_runtime.csv");
        assert_eq!(p.format, crate::evaluation::TableFormat::Tsv);
        assert_eq!(p.sample_sizes, vec![10, 20]);
        assert_eq!(p.estimators, vec![crate::estimators::EstimatorKind::AltBariance]);
        assert_eq!(
            p.distribution,
            DistributionChoice::Normal(NormalParameters {
                seed: Some(11),
                ..NormalParameters::default()
            })
        );
    }
}
