pub mod loaders;
pub mod portal;
pub mod settings;

pub use loaders::{
    find_project_config_down, find_project_config_up, global_config_path, load_global_config,
    load_project_config, save_global_config, save_project_config,
};
pub use portal::{
    Course, Problem, Submission, SubmitForm, TestQueueEntry, TestResult, TestResultProblem,
};
pub use settings::{AuthConfig, GlobalConfig, ProblemConfig, ProjectConfig};
