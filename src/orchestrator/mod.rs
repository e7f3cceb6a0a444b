//! 编排层（Orchestration Layer）
//!
//! 进程边界：解析命令行、读写本地配置、交互式设置，运行提交流程并输出结果。
//!
//! ```text
//! app (命令分发、配置、输出)
//!     ↓
//! workflow::SubmitFlow (一次提交)
//!     ↓
//! clients (门户协议) / services (打包)
//!     ↓
//! parser (HTML 解析)
//! ```

pub mod app;
pub mod cli;
pub mod paths;
pub mod setup;

pub use app::App;
pub use cli::{Cli, Command};
pub use setup::InteractiveSetup;
