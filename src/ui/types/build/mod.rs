mod error;
mod streams;
mod tasks;

pub use error::BuildError;

pub use streams::build_stream;
pub use tasks::{BuiltTask, TaskReport, build_task};
