pub mod logging;
pub mod prompt;
pub mod ui;

pub use ui::{show_request, SpinnerSteps};
