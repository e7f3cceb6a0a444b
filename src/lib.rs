//! # List Submit
//!
//! 向 LIST 课程门户提交解答并等待自动测试结果的命令行工具
//!
//! ## 架构设计
//!
//! ### ① 解析层（Parser）
//! - `parser/` - 把门户返回的 HTML 变成类型化记录，不做 I/O
//! - 页面结构不符时返回 `ParseError`，说明缺少的是什么
//!
//! ### ② 协议层（Clients）
//! - `clients/` - `PortalApi` 描述门户协议的每一步
//! - `ListClient` - 基于 reqwest 的实现，持有会话 cookie
//!
//! ### ③ 基础设施层（Infrastructure）
//! - `run_with_companion` - 耗时操作期间运行伴随线程（进度提示）
//! - `Interrupt` - Ctrl-C 中断标志
//!
//! ### ④ 业务能力层（Services）
//! - `ArchiveBuilder` - 把项目文件打成 zip
//!
//! ### ⑤ 流程层（Workflow）
//! - `SubmitFlow` - 登录 → 选择题目 → 上传 → 触发测试 → 轮询 → 获取结果
//!
//! ### ⑥ 编排层（Orchestration）
//! - `orchestrator/` - 命令行、本地配置、交互式设置、退出码

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ListClient, PortalApi, Session, TestRun};
pub use config::Config;
pub use error::{ListError, Result};
pub use orchestrator::{App, Cli};
pub use workflow::{FlowOutcome, FlowState, SubmitFlow};
