use crate::estimators::EstimatorKind;
use crate::evaluation::{DelimitedRecorder, Recorder, TimingRecord};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TableFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl TableFormat {
    /// Picks the format from a file extension, falling back to CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => TableFormat::Tsv,
            Some(ext) if ext.eq_ignore_ascii_case("json") => TableFormat::Json,
            _ => TableFormat::Csv,
        }
    }
}

/// Mean / min / max runtime of one estimator at one sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuntimeSummary {
    pub sample_size: usize,
    pub estimator: EstimatorKind,
    pub trials: u64,
    pub mean_ns: f64,
    pub min_ns: u64,
    pub max_ns: u64,
}

impl RuntimeSummary {
    fn empty(sample_size: usize, estimator: EstimatorKind) -> Self {
        Self {
            sample_size,
            estimator,
            trials: 0,
            mean_ns: 0.0,
            min_ns: u64::MAX,
            max_ns: 0,
        }
    }

    #[inline]
    fn absorb(&mut self, runtime_ns: u64) {
        self.trials += 1;
        self.mean_ns += (runtime_ns as f64 - self.mean_ns) / self.trials as f64;
        self.min_ns = self.min_ns.min(runtime_ns);
        self.max_ns = self.max_ns.max(runtime_ns);
    }
}

/// Running per-`(sample_size, estimator)` summaries, without keeping rows.
///
/// Ordered by size, then by estimator declaration order.
#[derive(Debug, Default, Clone)]
pub struct RuntimeSummaries {
    groups: BTreeMap<(usize, EstimatorKind), RuntimeSummary>,
}

impl RuntimeSummaries {
    pub fn add(&mut self, r: &TimingRecord) {
        self.groups
            .entry((r.sample_size, r.estimator))
            .or_insert_with(|| RuntimeSummary::empty(r.sample_size, r.estimator))
            .absorb(r.runtime_ns);
    }

    pub fn into_vec(self) -> Vec<RuntimeSummary> {
        self.groups.into_values().collect()
    }
}

/// In-memory collection of timing rows.
#[derive(Default)]
pub struct RuntimeTable {
    entries: Vec<TimingRecord>,
}

impl RuntimeTable {
    pub fn push(&mut self, record: TimingRecord) {
        self.entries.push(record)
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn records(&self) -> &[TimingRecord] {
        &self.entries
    }

    pub fn summarize(&self) -> Vec<RuntimeSummary> {
        let mut summaries = RuntimeSummaries::default();
        for r in &self.entries {
            summaries.add(r);
        }
        summaries.into_vec()
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: TableFormat) -> Result<(), Error> {
        match fmt {
            TableFormat::Csv => self.export_with_delimiter(path, ','),
            TableFormat::Tsv => self.export_with_delimiter(path, '\t'),
            TableFormat::Json => self.export_json(path),
        }
    }

    fn export_with_delimiter<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<(), Error> {
        let mut w = DelimitedRecorder::new(BufWriter::new(File::create(path)?), delimiter)?;
        for r in &self.entries {
            w.record(r)?;
        }
        w.finish()
    }

    fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &self.entries)?;
        writeln!(w)?;
        w.flush()
    }
}

impl Recorder for RuntimeTable {
    fn record(&mut self, record: &TimingRecord) -> Result<(), Error> {
        self.push(*record);
        Ok(())
    }
}

/// Buffers rows in a [`RuntimeTable`] and writes the file once the
/// benchmark finishes. Used for JSON, which cannot be streamed row by row.
pub struct TableExporter {
    table: RuntimeTable,
    path: PathBuf,
    format: TableFormat,
}

impl TableExporter {
    pub fn new<P: Into<PathBuf>>(path: P, format: TableFormat) -> Self {
        Self {
            table: RuntimeTable::default(),
            path: path.into(),
            format,
        }
    }

    pub fn table(&self) -> &RuntimeTable {
        &self.table
    }
}

impl Recorder for TableExporter {
    fn record(&mut self, record: &TimingRecord) -> Result<(), Error> {
        self.table.record(record)
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.table.export(&self.path, self.format)
    }
}
