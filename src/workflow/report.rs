//! 测试结果的文本摘要

use crate::models::TestResult;

/// 名称列在最长名称之外再留出的宽度
const NAME_PADDING: usize = 5;

/// 数字按原值输出，整数保留一位小数（`5` 显示为 `5.0`）
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// 生成结果摘要：第一行是总分，之后每个测试一行
pub fn render_summary(result: &TestResult) -> Vec<String> {
    let width = result
        .problems
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        + NAME_PADDING;

    let mut lines = Vec::with_capacity(result.problems.len() + 1);
    lines.push(format!("Total points: {}", format_number(result.total_points)));

    for problem in &result.problems {
        lines.push(format!(
            "{:<width$} points: {} percent: {}",
            problem.name,
            format_number(problem.points),
            format_number(problem.percentage),
            width = width
        ));
    }

    lines
}
