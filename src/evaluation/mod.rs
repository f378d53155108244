mod preview;

pub use preview::{
    DelimitedRecorder, RUNTIME_HEADER, Recorder, RuntimeSummaries, RuntimeSummary, RuntimeTable,
    TableExporter, TableFormat, TimingRecord, TrialProgress,
};
