pub mod toml_loader;

pub use toml_loader::{
    find_project_config_down, find_project_config_up, global_config_path, load_global_config,
    load_project_config, save_global_config, save_project_config,
};
