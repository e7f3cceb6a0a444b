//! 提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 登录
//! 2. 确定课程和题目，检查文件列表
//! 3. 打包并上传
//! 4. 触发自动测试（题目没有测试时直接结束）
//! 5. 轮询测试队列直到本次测试结束
//! 6. 获取测试结果
//!
//! 任何一步出错都直接返回，不重试，也不写本地配置。

use std::fmt;
use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::clients::{PortalApi, TestRun};
use crate::error::{ListError, Result};
use crate::infrastructure::Interrupt;
use crate::models::{Submission, TestResult};
use crate::services::ArchiveBuilder;
use crate::workflow::polling::{self, PollSettings};
use crate::workflow::steps::StepRunner;
use crate::workflow::submit_ctx::{ContextResolver, Credentials, SubmitContext};

/// 流程状态
///
/// 失败不单独建模为状态，[`SubmitFlow::run`] 返回的错误就是失败原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Authenticating,
    SelectingContext,
    Uploading,
    Triggering,
    Polling,
    Reporting,
    Done,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Authenticating => "Authenticating",
            FlowState::SelectingContext => "SelectingContext",
            FlowState::Uploading => "Uploading",
            FlowState::Triggering => "Triggering",
            FlowState::Polling => "Polling",
            FlowState::Reporting => "Reporting",
            FlowState::Done => "Done",
        };
        f.write_str(name)
    }
}

/// 一次成功提交的结果
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    pub context: SubmitContext,
    pub submission: Submission,
    /// 题目没有配置自动测试时为 `None`
    pub result: Option<TestResult>,
    /// 经过的状态，依次排列，最后一个总是 [`FlowState::Done`]
    pub states: Vec<FlowState>,
}

/// 提交流程
///
/// - 编排完整的提交流程，决定何时轮询、何时结束
/// - 不持有会话，会话只在 [`run`](Self::run) 内存在
/// - 每个远程步骤都交给 [`StepRunner`] 执行
pub struct SubmitFlow<'a, P: PortalApi, S: StepRunner> {
    api: &'a P,
    steps: &'a S,
    settings: PollSettings,
    interrupt: Interrupt,
}

impl<'a, P: PortalApi, S: StepRunner> SubmitFlow<'a, P, S> {
    pub fn new(api: &'a P, steps: &'a S, settings: PollSettings, interrupt: Interrupt) -> Self {
        Self {
            api,
            steps,
            settings,
            interrupt,
        }
    }

    pub async fn run<R: ContextResolver<P>>(
        &self,
        credentials: &Credentials,
        resolver: &mut R,
    ) -> Result<FlowOutcome> {
        let mut states = Vec::new();

        // ========== 登录 ==========
        self.advance(&mut states, FlowState::Authenticating)?;
        let session = self
            .steps
            .run_step(
                "logging in",
                self.api.login(&credentials.email, &credentials.password),
            )
            .await?;
        info!("✓ 已登录: {}", credentials.email);

        // ========== 确定提交目标 ==========
        self.advance(&mut states, FlowState::SelectingContext)?;
        let context = resolver.resolve(self.api, &session).await?;
        if context.files.is_empty() {
            return Err(ListError::EmptySubmission);
        }
        debug!(
            "提交目标: 课程 {} / 题目 {} ({}), {} 个文件",
            context.course_id,
            context.problem_id,
            context.problem_name,
            context.files.len()
        );

        // ========== 打包上传 ==========
        self.advance(&mut states, FlowState::Uploading)?;
        let archive = ArchiveBuilder::new(&context.project_dir).build(&context.files)?;
        let submission = self
            .steps
            .run_step(
                "submitting solution",
                self.api
                    .submit_solution(&session, context.problem_id, archive),
            )
            .await?;
        info!(
            "✓ 已上传: {} (版本 {})",
            submission.name, submission.version
        );

        // ========== 触发测试 ==========
        self.advance(&mut states, FlowState::Triggering)?;
        let triggered_at = polling::trigger_timestamp();
        let run = self
            .steps
            .run_step(
                "running tests",
                self.api
                    .trigger_test_run(&session, context.problem_id, submission.version),
            )
            .await?;

        let student_id = match run {
            TestRun::Enqueued { student_id } => student_id,
            TestRun::NoTests => {
                info!("题目没有配置自动测试，提交已完成");
                self.advance(&mut states, FlowState::Done)?;
                return Ok(FlowOutcome {
                    context,
                    submission,
                    result: None,
                    states,
                });
            }
        };

        // ========== 等待测试结束 ==========
        self.advance(&mut states, FlowState::Polling)?;
        let test_id = self
            .steps
            .run_step(
                "waiting for results",
                self.wait_for_test(&session, context.problem_id, &student_id, triggered_at),
            )
            .await?;

        // ========== 获取结果 ==========
        self.advance(&mut states, FlowState::Reporting)?;
        let result = self
            .steps
            .run_step("getting test results", self.api.fetch_test_result(&session, test_id))
            .await?;

        self.advance(&mut states, FlowState::Done)?;
        Ok(FlowOutcome {
            context,
            submission,
            result: Some(result),
            states,
        })
    }

    /// 进入下一个状态；除 `Done` 之外，进入前先检查用户是否中断
    fn advance(&self, states: &mut Vec<FlowState>, next: FlowState) -> Result<()> {
        if next != FlowState::Done {
            self.check_interrupt()?;
        }
        match states.last() {
            Some(prev) => debug!("状态: {} -> {}", prev, next),
            None => debug!("状态: {}", next),
        }
        states.push(next);
        Ok(())
    }

    fn check_interrupt(&self) -> Result<()> {
        if self.interrupt.is_triggered() {
            return Err(ListError::Interrupted);
        }
        Ok(())
    }

    /// 轮询测试队列，返回本次测试的ID
    async fn wait_for_test(
        &self,
        session: &P::Session,
        problem_id: u32,
        student_id: &str,
        triggered_at: NaiveDateTime,
    ) -> Result<u32> {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            self.check_interrupt()?;
            attempts += 1;

            let queue = self
                .api
                .poll_test_queue(session, problem_id, student_id)
                .await?;

            match polling::select_run_entry(&queue, triggered_at) {
                Some(entry) if entry.is_finished() => {
                    debug!("测试 {} 已结束 (第 {} 次查询)", entry.id, attempts);
                    return Ok(entry.id);
                }
                Some(entry) => debug!("测试 {} 仍在运行", entry.id),
                None => debug!("队列中还没有本次触发的测试 ({} 条历史记录)", queue.len()),
            }

            if let Some(timeout) = self.settings.timeout {
                if started.elapsed() >= timeout {
                    return Err(ListError::Timeout {
                        waited_secs: started.elapsed().as_secs(),
                    });
                }
            }

            tokio::time::sleep(self.settings.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(FlowState::SelectingContext.to_string(), "SelectingContext");
        assert_eq!(FlowState::Done.to_string(), "Done");
    }
}
