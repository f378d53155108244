mod recorder;
mod runtime_table;
mod timing_record;

pub use recorder::{DelimitedRecorder, RUNTIME_HEADER, Recorder};
pub use runtime_table::{RuntimeSummaries, RuntimeSummary, RuntimeTable, TableExporter, TableFormat};
pub use timing_record::{TimingRecord, TrialProgress};
