mod distribution_choice;
mod preset;
mod schema;
mod task_choice;
mod ui_choice;

pub use distribution_choice::*;
pub use preset::Preset;
pub use schema::*;
pub use task_choice::*;
pub use ui_choice::UIChoice;
