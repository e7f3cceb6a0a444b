//! 步骤执行器
//!
//! 工作流把每个远程步骤交给 [`StepRunner`]，由它决定执行期间向用户展示什么。
//! 命令行使用带进度提示的实现，测试和非交互场景使用 [`PlainSteps`]。

use std::future::Future;

use tracing::debug;

#[allow(async_fn_in_trait)]
pub trait StepRunner {
    /// 执行一个命名步骤，结果原样返回
    async fn run_step<F: Future>(&self, name: &str, work: F) -> F::Output;
}

/// 不显示任何提示，只记录调试日志
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSteps;

impl StepRunner for PlainSteps {
    async fn run_step<F: Future>(&self, name: &str, work: F) -> F::Output {
        debug!("开始步骤: {}", name);
        let output = work.await;
        debug!("步骤结束: {}", name);
        output
    }
}
