//! 门户协议的抽象
//!
//! 工作流只依赖这个 trait，真实实现是 [`ListClient`](super::ListClient)，
//! 测试中使用内存里的脚本化实现。

use crate::error::Result;
use crate::models::{Course, Problem, Submission, SubmitForm, TestQueueEntry, TestResult};

/// 触发测试的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestRun {
    /// 已加入测试队列，轮询时需要学生ID
    Enqueued { student_id: String },
    /// 题目没有配置自动测试，什么也没做
    NoTests,
}

/// 门户协议的每一步
///
/// 所有操作都不会在内部重试，重试策略属于工作流。
#[allow(async_fn_in_trait)]
pub trait PortalApi {
    /// 已登录的会话
    type Session;

    /// 登录并建立会话
    async fn login(&self, email: &str, password: &str) -> Result<Self::Session>;

    /// 列出当前学期的所有课程
    async fn list_courses(&self, session: &Self::Session) -> Result<Vec<Course>>;

    /// 把课程设为服务端的"当前课程"
    async fn activate_course(&self, session: &Self::Session, course_id: u32) -> Result<()>;

    /// 列出课程的题目（总是先激活课程）
    async fn list_problems(&self, session: &Self::Session, course_id: u32) -> Result<Vec<Problem>>;

    /// 上传解答压缩包，返回最新的一次提交
    async fn submit_solution(
        &self,
        session: &Self::Session,
        problem_id: u32,
        archive: Vec<u8>,
    ) -> Result<Submission>;

    /// 抓取触发测试的表单，题目没有测试时为 `None`
    async fn get_submit_form(
        &self,
        session: &Self::Session,
        problem_id: u32,
    ) -> Result<Option<SubmitForm>>;

    /// 为指定版本的提交触发自动测试
    async fn trigger_test_run(
        &self,
        session: &Self::Session,
        problem_id: u32,
        submit_version: u32,
    ) -> Result<TestRun>;

    /// 读取学生在该题目上的测试队列
    async fn poll_test_queue(
        &self,
        session: &Self::Session,
        problem_id: u32,
        student_id: &str,
    ) -> Result<Vec<TestQueueEntry>>;

    /// 读取测试结果
    async fn fetch_test_result(&self, session: &Self::Session, test_id: u32) -> Result<TestResult>;
}
