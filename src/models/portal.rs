//! L.I.S.T. 门户上的数据记录
//!
//! 所有记录都由解析层（`parser`）产生，调用方持有，互相之间没有反向引用。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// 课程ID（取自详情链接的最后一段路径）
    pub id: u32,
    pub name: String,
}

impl Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 课程中布置的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// `full_id` 第一个下划线之前的数字
    pub id: u32,
    /// 链接文件名（不含扩展名），例如 `5377_cvicenie_5`
    pub full_id: String,
    pub name: String,
}

impl Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 一次已上传的提交
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// 服务端生成的不透明标识
    pub id: String,
    /// 服务端分配的版本号，从 1 开始
    pub version: u32,
    pub name: String,
    pub problem_id: u32,
}

/// 触发自动测试所需的表单字段
///
/// 只在触发测试前临时抓取，从不持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitForm {
    pub tests: Vec<String>,
    pub task_set_id: String,
    pub student_id: String,
    pub select_test_type: String,
}

/// 测试队列中的一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestQueueEntry {
    pub id: u32,
    pub start_time: NaiveDateTime,
    /// `None` 表示测试仍在运行
    pub end_time: Option<NaiveDateTime>,
}

impl TestQueueEntry {
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

/// 测试结果
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub total_points: f64,
    pub problems: Vec<TestResultProblem>,
}

/// 测试结果中的单个子题
#[derive(Debug, Clone, PartialEq)]
pub struct TestResultProblem {
    pub name: String,
    /// 0 到 100 之间
    pub percentage: f64,
    pub points: f64,
    /// 评测输出，页面中没有时为 `None`
    pub output: Option<String>,
}
