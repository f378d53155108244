use crate::evaluation::TimingRecord;
use std::fs::File;
use std::io::{BufWriter, Error, Write};
use std::path::Path;

/// Column header shared by every runtime export.
pub const RUNTIME_HEADER: [&str; 4] = ["SampleSize", "Trial", "Estimator", "RuntimeNs"];

/// Sink for timing rows.
pub trait Recorder {
    fn record(&mut self, record: &TimingRecord) -> Result<(), Error>;

    /// Flushes buffered rows. Called once when the benchmark finishes.
    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Streams rows to any writer as delimiter-separated text, header first.
pub struct DelimitedRecorder<W: Write> {
    out: W,
    delimiter: char,
}

impl<W: Write> DelimitedRecorder<W> {
    pub fn new(mut out: W, delimiter: char) -> Result<Self, Error> {
        let d = delimiter.to_string();
        writeln!(out, "{}", RUNTIME_HEADER.join(&d))?;
        Ok(Self { out, delimiter })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl DelimitedRecorder<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes the CSV header.
    pub fn csv_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::new(BufWriter::new(File::create(path)?), ',')
    }
}

impl<W: Write> Recorder for DelimitedRecorder<W> {
    fn record(&mut self, r: &TimingRecord) -> Result<(), Error> {
        writeln!(
            self.out,
            "{}{d}{}{d}{}{d}{}",
            r.sample_size,
            r.trial,
            r.estimator,
            r.runtime_ns,
            d = self.delimiter
        )
    }

    fn finish(&mut self) -> Result<(), Error> {
        self.out.flush()
    }
}

impl<R: Recorder + ?Sized> Recorder for Box<R> {
    fn record(&mut self, record: &TimingRecord) -> Result<(), Error> {
        (**self).record(record)
    }

    fn finish(&mut self) -> Result<(), Error> {
        (**self).finish()
    }
}
