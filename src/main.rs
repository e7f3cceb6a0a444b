use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing::debug;

use list_submit::utils::logging;
use list_submit::{App, Cli, Config, ListError};

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let app = App::initialize(config).context("初始化失败")?;
    app.run(&cli).await?;
    Ok(())
}

/// 失败时的退出码和唯一一条提示信息
fn failure_report(err: &anyhow::Error) -> (i32, String) {
    let code = err
        .downcast_ref::<ListError>()
        .map(ListError::exit_code)
        .unwrap_or(1);
    let message = if code == 130 {
        "Interrupted".red().to_string()
    } else {
        format!("{} {:#}", "Error:".red().bold(), err)
    };
    (code, message)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(cli.verbose || config.verbose_logging);

    let started = Instant::now();
    match run(cli, config).await {
        Ok(()) => println!(
            "{} in {:.2} seconds",
            "Finished".purple(),
            started.elapsed().as_secs_f64()
        ),
        Err(err) => {
            debug!("{:?}", err);
            let (code, message) = failure_report(&err);
            eprintln!("{}", message);
            std::process::exit(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_report() {
        colored::control::set_override(false);

        let err = anyhow::Error::new(ListError::Interrupted);
        assert_eq!(failure_report(&err), (130, "Interrupted".to_string()));

        let err = anyhow::Error::new(ListError::EmptySubmission).context("提交失败");
        let (code, message) = failure_report(&err);
        assert_eq!(code, 1);
        assert!(message.starts_with("Error: 提交失败: 没有可提交的文件"));
        assert_eq!(message.lines().count(), 1);
    }
}
