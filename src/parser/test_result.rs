//! 测试结果解析（`/tasks/test_result/{id}.html`）

use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::{ElementQuery, ParseError};
use crate::models::{TestResult, TestResultProblem};

const TOTAL_POINTS_CELL: &str = "table.tests_result_sum_table > tbody > tr:nth-child(4) > td";
const EVALUATION_ROWS: &str = "table.tests_evaluation_table > tbody > tr";
const OUTPUT_BLOCKS: &str = "fieldset pre";

/// 解析测试结果
///
/// 找不到总分单元格时失败；评测表中没有数据单元格的行（表头）会被跳过。
pub fn parse_test_result(html: &str) -> Result<TestResult, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let total_cell = root.select_one(TOTAL_POINTS_CELL, "总分单元格")?;
    let total_points = parse_number(&total_cell.text_trimmed(), "总分")?;

    let percentage_pattern = Regex::new(r"^([0-9]+(?:[.,][0-9]+)?)\s*%$")
        .map_err(|e| ParseError::new(format!("百分比正则无效: {}", e)))?;

    let outputs = root
        .select_all(OUTPUT_BLOCKS)?
        .into_iter()
        .map(|pre| pre.text_trimmed())
        .collect::<Vec<_>>();

    let mut problems = Vec::new();
    for row in root.select_all(EVALUATION_ROWS)? {
        let cells = row.select_all("td")?;
        if cells.is_empty() {
            continue;
        }
        if cells.len() < 3 {
            return Err(ParseError::new(format!(
                "评测表的每行应有名称、百分比、分数三列，实际只有 {} 列",
                cells.len()
            )));
        }

        let name = cells[0].text_trimmed();

        let percentage_text = cells[1].text_trimmed();
        let percentage = percentage_pattern
            .captures(&percentage_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace(',', "."))
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|value| (0.0..=100.0).contains(value))
            .ok_or_else(|| {
                ParseError::new(format!(
                    "子题 '{}' 的百分比应为 0-100 之间的 `N%`，实际为 '{}'",
                    name, percentage_text
                ))
            })?;

        let points = parse_number(&cells[2].text_trimmed(), "子题分数")?;
        if points < 0.0 {
            return Err(ParseError::new(format!("子题 '{}' 的分数不能为负: {}", name, points)));
        }

        let output = outputs.get(problems.len()).cloned();

        problems.push(TestResultProblem {
            name,
            percentage,
            points,
            output,
        });
    }

    debug!("解析到总分 {}，共 {} 个子题", total_points, problems.len());

    Ok(TestResult {
        total_points,
        problems,
    })
}

fn parse_number(text: &str, what: &str) -> Result<f64, ParseError> {
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseError::new(format!("{} 应为数字，实际为 '{}'", what, text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULT: &str = r#"<html><body>
        <table class="tests_result_sum_table">
            <tbody>
                <tr><th>Test</th><td>Python testy</td></tr>
                <tr><th>Začiatok</th><td>05.11.2023 14:03:09</td></tr>
                <tr><th>Koniec</th><td>05.11.2023 14:03:41</td></tr>
                <tr><th>Body</th><td> 5.0 </td></tr>
            </tbody>
        </table>
        <table class="tests_evaluation_table">
            <thead><tr><th>Úloha</th><th>Percentá</th><th>Body</th></tr></thead>
            <tbody>
                <tr><td> test_fibonacci </td><td>100%</td><td>5.0</td></tr>
            </tbody>
        </table>
        <fieldset><legend>Výstup</legend><pre>
Ran 4 tests in 0.002s

OK
        </pre></fieldset>
    </body></html>"#;

    #[test]
    fn test_parse_test_result() {
        let result = parse_test_result(RESULT).unwrap();

        assert_eq!(result.total_points, 5.0);
        assert_eq!(result.problems.len(), 1);

        let problem = &result.problems[0];
        assert_eq!(problem.name, "test_fibonacci");
        assert_eq!(problem.percentage, 100.0);
        assert_eq!(problem.points, 5.0);
        assert_eq!(problem.output.as_deref(), Some("Ran 4 tests in 0.002s\n\nOK"));
    }

    #[test]
    fn test_missing_total_points_fails() {
        let html = r#"<table class="tests_evaluation_table"><tbody><tr><td>a</td><td>0%</td><td>0</td></tr></tbody></table>"#;
        let err = parse_test_result(html).unwrap_err();
        assert!(err.expected.contains("总分单元格"));
    }

    #[test]
    fn test_partial_scores_without_output() {
        let html = r#"
            <table class="tests_result_sum_table"><tbody>
                <tr><td>a</td></tr><tr><td>b</td></tr><tr><td>c</td></tr><tr><td>2.5</td></tr>
            </tbody></table>
            <table class="tests_evaluation_table"><tbody>
                <tr><td>zakladne</td><td>50 %</td><td>2.5</td></tr>
                <tr><td>rozsirene</td><td>0%</td><td>0</td></tr>
            </tbody></table>"#;

        let result = parse_test_result(html).unwrap();

        assert_eq!(result.total_points, 2.5);
        assert_eq!(result.problems[0].percentage, 50.0);
        assert_eq!(result.problems[1].points, 0.0);
        assert!(result.problems.iter().all(|p| p.output.is_none()));
    }

    #[test]
    fn test_percentage_out_of_range_fails() {
        let html = r#"
            <table class="tests_result_sum_table"><tbody>
                <tr><td>a</td></tr><tr><td>b</td></tr><tr><td>c</td></tr><tr><td>1</td></tr>
            </tbody></table>
            <table class="tests_evaluation_table"><tbody>
                <tr><td>x</td><td>140%</td><td>1</td></tr>
            </tbody></table>"#;

        assert!(parse_test_result(html).is_err());
    }

    #[test]
    fn test_non_finite_points_fail() {
        for total in ["NaN", "inf", "-infinity"] {
            let html = RESULT.replace(" 5.0 </td></tr>", &format!(" {} </td></tr>", total));
            assert!(parse_test_result(&html).is_err(), "{} 不应被接受", total);
        }

        let html = RESULT.replace("<td>5.0</td>", "<td>NaN</td>");
        assert!(parse_test_result(&html).is_err());
    }

    #[test]
    fn test_comma_decimal_points() {
        assert_eq!(parse_number("2,5", "body").unwrap(), 2.5);
        assert!(parse_number("inf", "body").is_err());
    }
}
