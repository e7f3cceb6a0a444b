//! 项目文件路径换算

use std::path::{Component, Path, PathBuf};

use crate::error::{ListError, Result};

/// 去掉 `.` 和 `..`，不访问文件系统
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// 把命令行给出的路径（相对 `cwd`）换算成相对项目目录的路径，统一使用 `/`
pub fn relative_to_project(cwd: &Path, project_dir: &Path, file: &Path) -> Result<String> {
    let absolute = normalize(&cwd.join(file));
    let project_dir = normalize(project_dir);

    let relative = absolute.strip_prefix(&project_dir).map_err(|_| {
        ListError::Config(format!(
            "文件 {} 不在项目目录 {} 中",
            file.display(),
            project_dir.display()
        ))
    })?;

    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    if parts.is_empty() {
        return Err(ListError::Config(format!("{} 是项目目录本身", file.display())));
    }

    Ok(parts.join("/"))
}
