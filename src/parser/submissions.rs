//! 提交列表解析（上传成功后的题目页面）

use scraper::Html;
use tracing::debug;

use super::{link_stem, ElementQuery, ParseError};
use crate::models::Submission;

/// 解析题目页面中的所有提交，按页面顺序（最早的在前）
///
/// 没有 input 的行（表头等）会被跳过。
pub fn parse_submissions(html: &str, problem_id: u32) -> Result<Vec<Submission>, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let rows = root.select_all("table.solutions_table tr")?;
    let total = rows.len();
    let mut submissions = Vec::with_capacity(total);

    for row in rows {
        let input = match row.select_first("input")? {
            Some(input) => input,
            None => {
                debug!("提交行中没有 input，跳过");
                continue;
            }
        };

        let raw_version = input.attr_or_fail("value", "提交版本 input")?;
        let version = raw_version
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v >= 1)
            .ok_or_else(|| {
                ParseError::new(format!("提交版本应为正整数，实际为 '{}'", raw_version))
            })?;

        let cell = row.select_one("td.file", "提交文件单元格")?;
        let anchor = cell.select_one("a", "提交文件下载链接")?;
        let href = anchor.attr_or_fail("href", "提交文件下载链接")?;

        submissions.push(Submission {
            id: link_stem(href).to_string(),
            version,
            name: anchor.text_trimmed(),
            problem_id,
        });
    }

    debug!("尝试解析 {} 行提交，成功 {} 个", total, submissions.len());

    Ok(submissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(version: u32, token: &str) -> String {
        format!(
            r#"<tr>
                <td><input type="radio" name="test[version]" value="{v}" /></td>
                <td class="file"><a href="/tasks/download_solution/5365/{t}">JurajPetras_{v}.zip</a></td>
                <td class="time">05.11.2023 14:0{v}:00</td>
            </tr>"#,
            v = version,
            t = token
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="solutions_table">
                <thead><tr><th>Verzia</th><th>Súbor</th><th>Čas</th></tr></thead>
                <tbody>{}</tbody>
            </table></body></html>"#,
            rows.join("")
        )
    }

    #[test]
    fn test_parse_submissions() {
        let html = page(&[
            row(1, "MjIyMV9KdXJhalBldHJhc183ZDA0XzEuemlw"),
            row(2, "MjIyMV9KdXJhalBldHJhc185MDAxXzIuemlw"),
            row(3, "MjIyMV9KdXJhalBldHJhc183MGZmXzMuemlw"),
        ]);

        let submissions = parse_submissions(&html, 5365).unwrap();

        assert_eq!(submissions.len(), 3);
        assert_eq!(
            submissions[0],
            Submission {
                id: "MjIyMV9KdXJhalBldHJhc183ZDA0XzEuemlw".to_string(),
                version: 1,
                name: "JurajPetras_1.zip".to_string(),
                problem_id: 5365,
            }
        );
        assert_eq!(submissions.last().unwrap().version, 3);
    }

    #[test]
    fn test_empty_table_is_not_an_error() {
        let submissions = parse_submissions(&page(&[]), 5365).unwrap();
        assert!(submissions.is_empty());

        let submissions = parse_submissions("<html><body></body></html>", 5365).unwrap();
        assert!(submissions.is_empty());
    }

    #[test]
    fn test_row_without_file_link_fails() {
        let broken = r#"<tr><td><input value="4" /></td><td class="time">-</td></tr>"#.to_string();
        let err = parse_submissions(&page(&[row(1, "abc"), broken]), 5365).unwrap_err();
        assert!(err.expected.contains("td.file"));
    }

    #[test]
    fn test_invalid_version_fails() {
        let broken = r#"<tr><td><input value="x" /></td><td class="file"><a href="/d/abc">a.zip</a></td></tr>"#.to_string();
        assert!(parse_submissions(&page(&[broken]), 1).is_err());
    }
}
