//! 提交上下文 - 一次提交针对哪门课、哪道题、哪些文件

use std::path::PathBuf;

use crate::clients::PortalApi;
use crate::error::Result;
use crate::models::ProjectConfig;

/// 登录凭据
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// 提交目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitContext {
    pub course_id: u32,
    pub problem_id: u32,
    pub problem_name: String,
    /// 文件路径的基准目录（项目配置所在目录）
    pub project_dir: PathBuf,
    pub files: Vec<String>,
}

impl SubmitContext {
    pub fn from_project(config: &ProjectConfig, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            course_id: config.problem.course_id,
            problem_id: config.problem.problem_id,
            problem_name: config.problem.problem_name.clone(),
            project_dir: project_dir.into(),
            files: config.problem.files.clone(),
        }
    }
}

/// 在已登录的会话中确定提交目标
///
/// 交互式实现会列出课程和题目让用户选择；已有项目配置时直接使用 [`StoredContext`]。
#[allow(async_fn_in_trait)]
pub trait ContextResolver<P: PortalApi> {
    async fn resolve(&mut self, api: &P, session: &P::Session) -> Result<SubmitContext>;
}

/// 已经确定好的提交目标
#[derive(Debug, Clone)]
pub struct StoredContext(pub SubmitContext);

impl<P: PortalApi> ContextResolver<P> for StoredContext {
    async fn resolve(&mut self, _api: &P, _session: &P::Session) -> Result<SubmitContext> {
        Ok(self.0.clone())
    }
}
