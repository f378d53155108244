pub mod exhausted_stream;
pub mod scripted_driver;
pub mod vec_stream;

pub use exhausted_stream::ExhaustedStream;
pub use scripted_driver::ScriptedDriver;
pub use vec_stream::VecStream;
