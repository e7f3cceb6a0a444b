//! 提交压缩包服务 - 业务能力层
//!
//! 只负责"把项目文件打成 zip"，不关心上传。

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ListError, Result};

/// 压缩包构建器
///
/// 每个文件只保留文件名放在压缩包根目录，不保留目录结构。
pub struct ArchiveBuilder {
    project_dir: PathBuf,
}

impl ArchiveBuilder {
    /// `files` 中的相对路径都以 `project_dir` 为基准
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// 在内存中构建 zip（DEFLATE）
    pub fn build(&self, files: &[String]) -> Result<Vec<u8>> {
        if files.is_empty() {
            return Err(ListError::EmptySubmission);
        }

        let mut cursor = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(&mut cursor);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(false);

        let mut seen = HashSet::new();
        for file in files {
            let path = self.project_dir.join(file);
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| ListError::Config(format!("无效的文件路径: {}", file)))?
                .to_string();

            if !seen.insert(name.clone()) {
                return Err(ListError::Config(format!(
                    "压缩包中会出现重名文件 '{}'，提交时不保留目录结构",
                    name
                )));
            }

            let content =
                std::fs::read(&path).map_err(|e| ListError::io(path.display().to_string(), e))?;

            debug!("打包文件: {} ({} 字节)", file, content.len());
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&content)
                .map_err(|e| ListError::io(path.display().to_string(), e))?;
        }

        zip.finish()?;

        Ok(cursor.into_inner())
    }
}
