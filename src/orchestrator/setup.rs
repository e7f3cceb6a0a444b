//! 首次运行时的交互式项目设置

use std::path::PathBuf;

use colored::Colorize;
use tracing::info;

use crate::clients::PortalApi;
use crate::error::Result;
use crate::models::settings::PROJECT_CONFIG_NAME;
use crate::models::{save_project_config, ProjectConfig};
use crate::utils::prompt::select_from_list;
use crate::utils::show_request;
use crate::workflow::{ContextResolver, SubmitContext};

/// 列出课程和题目让用户选择，然后在 `project_dir` 中创建项目配置
pub struct InteractiveSetup {
    project_dir: PathBuf,
    created: Option<ProjectConfig>,
}

impl InteractiveSetup {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            created: None,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CONFIG_NAME)
    }

    /// 设置完成后新建的项目配置
    pub fn into_created(self) -> Option<ProjectConfig> {
        self.created
    }
}

impl<P: PortalApi> ContextResolver<P> for InteractiveSetup {
    async fn resolve(&mut self, api: &P, session: &P::Session) -> Result<SubmitContext> {
        let courses = show_request("all courses", api.list_courses(session)).await?;
        println!("{}", "Select a course:".bold());
        let course = select_from_list(&courses, |c| c.name.clone())?;
        println!();

        let problems = show_request(
            &format!("problems for course '{}'", course.name),
            api.list_problems(session, course.id),
        )
        .await?;
        println!("{}", "Select a problem:".bold());
        let problem = select_from_list(&problems, |p| p.name.clone())?;
        println!();

        let config = ProjectConfig::new(course.id, problem.id, problem.name.as_str());
        let path = self.config_path();
        save_project_config(&path, &config).await?;
        info!("✓ 已创建项目配置: {}", path.display());
        println!("{} {}", "Created".purple(), path.display());

        let context = SubmitContext::from_project(&config, &self.project_dir);
        self.created = Some(config);
        Ok(context)
    }
}
