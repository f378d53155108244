use crate::ui::cli::drivers::PromptDriver;
use anyhow::{Context, Result, anyhow};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers wizard prompts from a fixed script. An empty answer takes the
/// prompt's default; select answers match an option by prefix.
pub struct ScriptedDriver {
    answers: RefCell<VecDeque<String>>,
}

impl ScriptedDriver {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, title: &str) -> Result<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("script ran out of answers at '{title}'"))
    }
}

impl PromptDriver for ScriptedDriver {
    fn ask_bool(&self, title: &str, _help: &str, default: bool) -> Result<bool> {
        match self.next(title)?.as_str() {
            "" => Ok(default),
            "y" | "yes" | "true" => Ok(true),
            _ => Ok(false),
        }
    }

    fn ask_string(&self, title: &str, _help: &str, default: &str) -> Result<String> {
        let a = self.next(title)?;
        Ok(if a.is_empty() { default.to_string() } else { a })
    }

    fn ask_select(&self, title: &str, _help: &str, options: &[String], default: &str) -> Result<String> {
        let a = self.next(title)?;
        let wanted = if a.is_empty() { default } else { a.as_str() };
        options
            .iter()
            .find(|o| o.starts_with(wanted))
            .cloned()
            .with_context(|| format!("no option of '{title}' starts with '{wanted}'"))
    }

    fn ask_u64(&self, title: &str, _help: &str, default: u64, _min: Option<u64>, _max: Option<u64>) -> Result<u64> {
        let a = self.next(title)?;
        if a.is_empty() {
            return Ok(default);
        }
        a.parse().with_context(|| format!("bad integer for '{title}'"))
    }

    fn ask_f64(&self, title: &str, _help: &str, default: f64, _min: Option<f64>, _max: Option<f64>) -> Result<f64> {
        let a = self.next(title)?;
        if a.is_empty() {
            return Ok(default);
        }
        a.parse().with_context(|| format!("bad number for '{title}'"))
    }
}
