use anyhow::Result;

/// Answers wizard questions. Implemented by the terminal driver and by
/// scripted drivers in tests.
pub trait PromptDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool>;
    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String>;

    /// Picks one of `options`; `default` preselects a matching entry.
    fn ask_select(
        &self,
        title: &str,
        help: &str,
        options: &[String],
        default: &str,
    ) -> Result<String>;

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64>;
    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64>;
}
