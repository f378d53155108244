use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use std::fmt::Display;
use std::str::FromStr;

pub struct InquireDriver;

/// Message for a value outside `[min, max]`, or `None` when it fits.
fn out_of_range<T: PartialOrd + Display>(x: &T, min: Option<&T>, max: Option<&T>) -> Option<String> {
    match (min, max) {
        (Some(lo), Some(hi)) if x < lo || x > hi => Some(format!("Must be between {lo} and {hi}")),
        (Some(lo), None) if x < lo => Some(format!("Must be ≥ {lo}")),
        (None, Some(hi)) if x > hi => Some(format!("Must be ≤ {hi}")),
        _ => None,
    }
}

fn ask_bounded<T>(title: &str, help: &str, default: T, min: Option<T>, max: Option<T>) -> Result<T>
where
    T: Copy + Clone + PartialOrd + Display + FromStr + Send + Sync + 'static,
{
    let q = CustomType::<T>::new(title)
        .with_default(default)
        .with_help_message(help)
        .with_validator(move |x: &T| {
            Ok(match out_of_range(x, min.as_ref(), max.as_ref()) {
                Some(msg) => Validation::Invalid(msg.into()),
                None => Validation::Valid,
            })
        });
    Ok(q.prompt()?)
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: &str,
    ) -> Result<String> {
        let cursor = options.iter().position(|o| o == default).unwrap_or(0);
        Ok(Select::new(title, options.to_vec())
            .with_starting_cursor(cursor)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        ask_bounded(title, help, default, min, max)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        ask_bounded(title, help, default, min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages() {
        assert_eq!(out_of_range(&5u64, Some(&1), Some(&10)), None);
        assert_eq!(
            out_of_range(&0u64, Some(&1), Some(&10)).as_deref(),
            Some("Must be between 1 and 10")
        );
        assert_eq!(out_of_range(&0.5f64, Some(&1.0), None).as_deref(), Some("Must be ≥ 1"));
        assert_eq!(out_of_range(&11u64, None, Some(&10)).as_deref(), Some("Must be ≤ 10"));
        assert_eq!(out_of_range::<u64>(&11, None, None), None);
    }
}
