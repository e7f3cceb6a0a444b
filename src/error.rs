use thiserror::Error;

use crate::parser::ParseError;

/// 应用程序错误类型
///
/// 每一种都会原样传递到进程边界，由 `main` 转换成一条提示信息和退出码。
#[derive(Debug, Error)]
pub enum ListError {
    /// 登录失败：服务器没有返回重定向，或者没有下发会话 cookie
    #[error("登录失败: {reason}")]
    Authentication { reason: String },

    /// 服务器返回了意外的状态码，或者状态标志为 false
    #[error("远程请求失败 ({endpoint}): {reason}")]
    Remote { endpoint: String, reason: String },

    /// 页面结构与预期不符
    #[error("页面解析失败: {0}")]
    Parse(#[from] ParseError),

    /// 项目中没有配置任何文件
    #[error("没有可提交的文件，请先使用 `list-submit add <文件>` 添加")]
    EmptySubmission,

    /// 用户中断
    #[error("已中断")]
    Interrupted,

    /// 等待测试结果超时
    #[error("等待测试结果超时 ({waited_secs} 秒)")]
    Timeout { waited_secs: u64 },

    /// 网络请求失败
    #[error("网络请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// 文件读写失败
    #[error("文件错误 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 打包提交文件失败
    #[error("打包失败: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

// ========== 便捷构造函数 ==========

impl ListError {
    /// 创建登录错误
    pub fn authentication(reason: impl Into<String>) -> Self {
        ListError::Authentication {
            reason: reason.into(),
        }
    }

    /// 创建远程请求错误
    pub fn remote(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        ListError::Remote {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// 创建文件错误
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ListError::Io {
            path: path.into(),
            source,
        }
    }

    /// 进程退出码：中断为 130，其余失败为 1
    pub fn exit_code(&self) -> i32 {
        match self {
            ListError::Interrupted => 130,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for ListError {
    fn from(err: toml::de::Error) -> Self {
        ListError::Config(format!("TOML解析失败: {}", err))
    }
}

impl From<toml::ser::Error> for ListError {
    fn from(err: toml::ser::Error) -> Self {
        ListError::Config(format!("TOML序列化失败: {}", err))
    }
}

/// Ctrl-C 和 Esc 都算作用户中断
impl From<inquire::InquireError> for ListError {
    fn from(err: inquire::InquireError) -> Self {
        use inquire::InquireError;

        match err {
            InquireError::OperationInterrupted | InquireError::OperationCanceled => {
                ListError::Interrupted
            }
            InquireError::IO(source) => ListError::io("<terminal>", source),
            other => ListError::Config(format!("终端输入失败: {}", other)),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, ListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ListError::Interrupted.exit_code(), 130);
        assert_eq!(ListError::EmptySubmission.exit_code(), 1);
        assert_eq!(ListError::authentication("bad status").exit_code(), 1);
        assert_eq!(ListError::Timeout { waited_secs: 5 }.exit_code(), 1);
    }

    #[test]
    fn test_parse_error_keeps_description() {
        let err: ListError = ParseError::new("课程卡片中的 'Zobraz detaily' 链接").into();
        assert!(err.to_string().contains("Zobraz detaily"));
    }

    #[test]
    fn test_prompt_errors() {
        use inquire::InquireError;

        let err: ListError = InquireError::OperationInterrupted.into();
        assert_eq!(err.exit_code(), 130);
        let err: ListError = InquireError::OperationCanceled.into();
        assert!(matches!(err, ListError::Interrupted));

        let err: ListError = InquireError::NotTTY.into();
        assert!(matches!(err, ListError::Config(_)));
        assert_eq!(err.exit_code(), 1);

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: ListError = InquireError::IO(io).into();
        assert!(matches!(err, ListError::Io { .. }));
    }
}
