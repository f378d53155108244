pub mod math;
pub mod system;
