pub mod fixtures;
pub mod stubs;

pub use stubs::{ExhaustedStream, ScriptedDriver, VecStream};
