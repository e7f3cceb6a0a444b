//! 终端进度提示
//!
//! 每个远程步骤执行期间显示一个 spinner，由伴随线程驱动，步骤结束后输出
//! `Requesting <步骤> => done`。

use std::future::Future;
use std::time::{Duration, Instant};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::infrastructure::{run_with_companion, IsAlive};
use crate::workflow::StepRunner;

const TICK: Duration = Duration::from_millis(80);

/// 带 spinner 的步骤执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinnerSteps;

impl StepRunner for SpinnerSteps {
    async fn run_step<F: Future>(&self, name: &str, work: F) -> F::Output {
        let message = format!("{} {}", "Requesting".green(), name);
        run_with_companion(work, move |is_alive| spin(message, is_alive)).await
    }
}

fn spin(message: String, is_alive: IsAlive) {
    let started = Instant::now();
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.clone());

    while is_alive.get() {
        spinner.tick();
        std::thread::sleep(TICK);
    }

    spinner.finish_with_message(format!(
        "{} => done {}",
        message,
        format!("({:.2}s)", started.elapsed().as_secs_f64()).dimmed()
    ));
}

/// 运行一个带 spinner 的步骤（不经过工作流时使用，例如交互式选择课程）
pub async fn show_request<F: Future>(name: &str, work: F) -> F::Output {
    SpinnerSteps.run_step(name, work).await
}
