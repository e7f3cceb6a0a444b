pub mod polling;
pub mod report;
pub mod steps;
pub mod submit_ctx;
pub mod submit_flow;

pub use polling::{select_run_entry, PollSettings};
pub use report::{format_number, render_summary};
pub use steps::{PlainSteps, StepRunner};
pub use submit_ctx::{ContextResolver, Credentials, StoredContext, SubmitContext};
pub use submit_flow::{FlowOutcome, FlowState, SubmitFlow};
