use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 门户地址
    pub base_url: String,
    /// 两次查询测试队列之间的间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 等待测试结果的最长时间（秒），0 表示不限制
    pub poll_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 登录信息（覆盖全局配置文件中保存的） ---
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://list.fmph.uniba.sk".to_string(),
            poll_interval_ms: 500,
            poll_timeout_secs: 600,
            verbose_logging: false,
            email: None,
            password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("LIST_BASE_URL").unwrap_or(default.base_url),
            poll_interval_ms: std::env::var("LIST_POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            poll_timeout_secs: std::env::var("LIST_POLL_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            email: std::env::var("LIST_EMAIL").ok().filter(|v| !v.is_empty()),
            password: std::env::var("LIST_PASSWORD").ok().filter(|v| !v.is_empty()),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// `None` 表示不限制等待时间
    pub fn poll_timeout(&self) -> Option<Duration> {
        match self.poll_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_settings() {
        let config = Config::default();
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
        assert_eq!(config.poll_timeout(), Some(Duration::from_secs(600)));

        let unbounded = Config {
            poll_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(unbounded.poll_timeout(), None);
    }
}
