//! 页面解析层
//!
//! 把门户返回的 HTML 转换成 `models` 中的记录，不做任何 I/O。
//!
//! 三种失败策略：
//! - 单个条目结构不完整：丢弃该条目并记录 debug 日志，继续解析
//! - 页面本身不是预期的布局：直接返回 [`ParseError`]，不返回可能错误的数据
//! - 测试表单中没有任何测试项：返回 `None`，表示该题目没有自动测试

pub mod courses;
pub mod problems;
pub mod submissions;
pub mod submit_form;
pub mod test_queue;
pub mod test_result;

pub use courses::parse_courses;
pub use problems::parse_problems;
pub use submissions::parse_submissions;
pub use submit_form::parse_submit_form;
pub use test_queue::parse_test_queue;
pub use test_result::parse_test_result;

use chrono::NaiveDateTime;
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// 门户页面上使用的时间格式
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// 页面结构与预期不符
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("未找到预期的页面结构: {expected}")]
pub struct ParseError {
    /// 期望找到但缺失（或不匹配）的结构描述
    pub expected: String,
}

impl ParseError {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

/// 编译 CSS 选择器
pub(crate) fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::new(format!("无效的选择器 `{}`: {:?}", css, e)))
}

/// 对元素的类型化查询：要么拿到结果，要么带着描述失败
pub(crate) trait ElementQuery<'a> {
    /// 所有匹配的后代元素，按文档顺序
    fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'a>>, ParseError>;

    /// 第一个匹配的后代元素，没有时为 `None`
    fn select_first(&self, css: &str) -> Result<Option<ElementRef<'a>>, ParseError>;

    /// 第一个匹配的后代元素，没有时失败
    fn select_one(&self, css: &str, expected: &str) -> Result<ElementRef<'a>, ParseError>;

    /// 读取属性，没有时失败
    fn attr_or_fail(&self, name: &str, expected: &str) -> Result<&'a str, ParseError>;

    /// 拼接后的文本，去掉首尾空白
    fn text_trimmed(&self) -> String;
}

impl<'a> ElementQuery<'a> for ElementRef<'a> {
    fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'a>>, ParseError> {
        let sel = selector(css)?;
        Ok(self.select(&sel).collect())
    }

    fn select_first(&self, css: &str) -> Result<Option<ElementRef<'a>>, ParseError> {
        let sel = selector(css)?;
        let first = self.select(&sel).next();
        Ok(first)
    }

    fn select_one(&self, css: &str, expected: &str) -> Result<ElementRef<'a>, ParseError> {
        self.select_first(css)?
            .ok_or_else(|| ParseError::new(format!("{} (`{}`)", expected, css)))
    }

    fn attr_or_fail(&self, name: &str, expected: &str) -> Result<&'a str, ParseError> {
        let element: &'a scraper::node::Element = self.value();
        element
            .attr(name)
            .ok_or_else(|| ParseError::new(format!("{} 的 `{}` 属性", expected, name)))
    }

    fn text_trimmed(&self) -> String {
        self.text().collect::<String>().trim().to_string()
    }
}

/// 链接最后一段路径去掉扩展名，例如 `/tasks/task/5377_cvicenie_5.html` → `5377_cvicenie_5`
pub(crate) fn link_stem(href: &str) -> &str {
    let last = href.rsplit('/').next().unwrap_or(href);
    last.split('.').next().unwrap_or(last)
}

/// 解析门户时间戳
pub(crate) fn parse_timestamp(text: &str, what: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(text.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        ParseError::new(format!(
            "{} 应为 `日.月.年 时:分:秒` 格式，实际为 '{}' ({})",
            what,
            text.trim(),
            e
        ))
    })
}
