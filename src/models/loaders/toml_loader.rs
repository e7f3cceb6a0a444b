use crate::error::{ListError, Result};
use crate::models::settings::{
    GlobalConfig, ProjectConfig, GLOBAL_CONFIG_VERSION, PROJECT_CONFIG_NAME,
    PROJECT_CONFIG_VERSION,
};
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 只读取版本号，用于在完整解析之前判断格式
#[derive(Debug, Deserialize)]
struct VersionHeader {
    version: Option<String>,
}

/// 全局配置文件路径
#[cfg(not(target_os = "windows"))]
pub fn global_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| ListError::Config("环境变量 HOME 不存在".to_string()))?;
    Ok(PathBuf::from(home).join(".config/list-submit/config.toml"))
}

/// 全局配置文件路径
#[cfg(target_os = "windows")]
pub fn global_config_path() -> Result<PathBuf> {
    let home = std::env::var("USERPROFILE")
        .map_err(|_| ListError::Config("环境变量 USERPROFILE 不存在".to_string()))?;
    Ok(PathBuf::from(home).join("AppData/Roaming/list-submit/config.toml"))
}

/// 加载全局配置
///
/// 文件不存在、损坏或版本不符时返回 `None`（调用方使用默认配置），只记录警告。
pub async fn load_global_config(path: &Path) -> Result<Option<GlobalConfig>> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("全局配置不存在，将使用默认配置: {}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(ListError::io(path.display().to_string(), e)),
    };

    let version = match toml::from_str::<VersionHeader>(&content) {
        Ok(header) => header.version,
        Err(e) => {
            tracing::warn!("全局配置不是有效的TOML，将替换为默认配置: {}", e);
            return Ok(None);
        }
    };

    if version.as_deref() != Some(GLOBAL_CONFIG_VERSION) {
        tracing::warn!(
            "全局配置版本不符，将替换为默认配置 (期望: {}, 实际: {:?})",
            GLOBAL_CONFIG_VERSION,
            version
        );
        return Ok(None);
    }

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            if config.auth.as_ref().is_some_and(|auth| auth.is_empty()) {
                config.auth = None;
            }
            Ok(Some(config))
        }
        Err(e) => {
            tracing::warn!("全局配置已损坏，将替换为默认配置: {}", e);
            Ok(None)
        }
    }
}

/// 保存全局配置，必要时创建目录
pub async fn save_global_config(path: &Path, config: &GlobalConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ListError::io(parent.display().to_string(), e))?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)
        .await
        .map_err(|e| ListError::io(path.display().to_string(), e))?;

    Ok(())
}

/// 加载项目配置，版本不符时报错
pub async fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ListError::io(path.display().to_string(), e))?;

    let header: VersionHeader = toml::from_str(&content)?;
    if header.version.as_deref() != Some(PROJECT_CONFIG_VERSION) {
        return Err(ListError::Config(format!(
            "项目配置版本不符 ({}): 期望 {}, 实际 {:?}",
            path.display(),
            PROJECT_CONFIG_VERSION,
            header.version
        )));
    }

    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// 保存项目配置，文件列表去重
pub async fn save_project_config(path: &Path, config: &ProjectConfig) -> Result<()> {
    let mut config = config.clone();
    let mut seen = std::collections::HashSet::new();
    config.problem.files.retain(|f| seen.insert(f.clone()));

    let content = toml::to_string_pretty(&config)?;
    fs::write(path, content)
        .await
        .map_err(|e| ListError::io(path.display().to_string(), e))?;

    tracing::debug!("已保存项目配置: {}", path.display());
    Ok(())
}

/// 从 `start` 开始向上查找项目配置
pub fn find_project_config_up(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_NAME))
        .find(|candidate| candidate.is_file())
}

/// 从 `start` 开始广度优先向下查找名为 `project_name` 的目录中的项目配置
pub async fn find_project_config_down(start: &Path, project_name: &str) -> Result<Option<PathBuf>> {
    let mut queue = VecDeque::new();
    queue.push_back(start.to_path_buf());

    while let Some(dir) = queue.pop_front() {
        if dir.file_name().and_then(|n| n.to_str()) == Some(project_name) {
            let candidate = dir.join(PROJECT_CONFIG_NAME);
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!("无法读取目录 {}: {}", dir.display(), e);
                continue;
            }
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ListError::io(dir.display().to_string(), e))?
        {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                queue.push_back(entry.path());
            }
        }
    }

    Ok(None)
}
