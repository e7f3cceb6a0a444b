//! 保存在本地的 TOML 配置

use serde::{Deserialize, Serialize};

pub const GLOBAL_CONFIG_VERSION: &str = "0.0.1";
pub const PROJECT_CONFIG_VERSION: &str = "0.0.1";
/// 项目配置文件名
pub const PROJECT_CONFIG_NAME: &str = "list-submit.toml";

/// 全局配置（`~/.config/list-submit/config.toml`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            version: GLOBAL_CONFIG_VERSION.to_string(),
            auth: None,
        }
    }
}

/// 登录信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
}

impl AuthConfig {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty()
    }
}

/// 项目配置（项目目录下的 `list-submit.toml`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub version: String,
    pub problem: ProblemConfig,
}

/// 项目对应的课程、题目和要提交的文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemConfig {
    pub course_id: u32,
    pub problem_id: u32,
    pub problem_name: String,
    /// 相对项目目录的路径
    #[serde(default)]
    pub files: Vec<String>,
}

impl ProjectConfig {
    pub fn new(course_id: u32, problem_id: u32, problem_name: impl Into<String>) -> Self {
        Self {
            version: PROJECT_CONFIG_VERSION.to_string(),
            problem: ProblemConfig {
                course_id,
                problem_id,
                problem_name: problem_name.into(),
                files: Vec::new(),
            },
        }
    }

    /// 添加文件，已存在的忽略；返回实际新增的数量
    pub fn add_files(&mut self, files: impl IntoIterator<Item = String>) -> usize {
        let mut added = 0;
        for file in files {
            if !self.problem.files.contains(&file) {
                self.problem.files.push(file);
                added += 1;
            }
        }
        added
    }

    /// 移除文件；返回实际移除的数量
    pub fn remove_files(&mut self, files: &[String]) -> usize {
        let before = self.problem.files.len();
        self.problem.files.retain(|f| !files.contains(f));
        before - self.problem.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_files() {
        let mut config = ProjectConfig::new(152, 5377, "Cvičenie 5");

        assert_eq!(config.add_files(vec!["riesenie.py".to_string(), "test.py".to_string()]), 2);
        assert_eq!(config.add_files(vec!["riesenie.py".to_string()]), 0);
        assert_eq!(config.problem.files, vec!["riesenie.py", "test.py"]);

        assert_eq!(config.remove_files(&["test.py".to_string(), "iny.py".to_string()]), 1);
        assert_eq!(config.problem.files, vec!["riesenie.py"]);
    }

    #[test]
    fn test_empty_auth() {
        let auth = AuthConfig {
            email: String::new(),
            password: String::new(),
        };
        assert!(auth.is_empty());
    }
}
