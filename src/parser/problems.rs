//! 题目列表解析（`/tasks.html`）

use regex::Regex;
use scraper::Html;
use tracing::debug;

use super::{link_stem, ElementQuery, ParseError};
use crate::models::Problem;

/// 解析当前激活课程的所有题目
pub fn parse_problems(html: &str) -> Result<Vec<Problem>, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let id_pattern = Regex::new(r"^(\d+)(?:_|$)")
        .map_err(|e| ParseError::new(format!("题目ID正则无效: {}", e)))?;

    let cells = root.select_all("td.td_name")?;
    let total = cells.len();
    let mut problems = Vec::with_capacity(total);

    for cell in cells {
        let anchor = match cell.select_first("a")? {
            Some(anchor) => anchor,
            None => {
                debug!("题目单元格中没有链接，跳过: '{}'", cell.text_trimmed());
                continue;
            }
        };

        let name = anchor.text_trimmed();
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => {
                debug!("题目 '{}' 的链接没有 href，跳过", name);
                continue;
            }
        };

        let full_id = link_stem(href);
        let id = id_pattern
            .captures(full_id)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse::<u32>().ok())
            .ok_or_else(|| {
                ParseError::new(format!(
                    "题目 '{}' 的链接文件名应以数字ID开头，实际为 '{}'",
                    name, full_id
                ))
            })?;

        problems.push(Problem {
            id,
            full_id: full_id.to_string(),
            name,
        });
    }

    debug!("尝试解析 {} 道题目，成功 {} 道", total, problems.len());

    Ok(problems)
}
