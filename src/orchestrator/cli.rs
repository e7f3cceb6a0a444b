//! 命令行参数

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// 向 LIST 门户提交解答并等待自动测试结果
#[derive(Debug, Parser)]
#[command(name = "list-submit", version, about, long_about = None)]
pub struct Cli {
    /// 项目名：在当前目录下查找同名目录中的 list-submit.toml
    pub project: Option<String>,

    /// 显示详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 输入并保存登录信息
    #[arg(long)]
    pub auth: bool,

    /// 不再询问确认
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 把文件加入项目
    Add {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// 从项目中移除文件
    Remove {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// 移除已经不存在的文件
    Clean,
}
