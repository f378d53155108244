pub mod build;
pub mod choices;
