//! 测试队列解析（`/index.php/fetests/get_student_test_queue/{problem}/{student}`）

use scraper::Html;
use tracing::debug;

use super::{link_stem, parse_timestamp, ElementQuery, ParseError};
use crate::models::TestQueueEntry;

/// 结束时间列中表示"仍在运行"的文字
pub const STILL_RUNNING: &str = "Ešte neukončené!";

const START_COLUMN: usize = 2;
const END_COLUMN: usize = 3;

/// 解析学生的测试队列
pub fn parse_test_queue(html: &str) -> Result<Vec<TestQueueEntry>, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let rows = root.select_all("tbody tr")?;
    let total = rows.len();
    let mut entries = Vec::with_capacity(total);

    for row in rows {
        let anchor = match row.select_first("td > a")? {
            Some(anchor) => anchor,
            None => {
                debug!("队列行中没有结果链接，跳过: '{}'", row.text_trimmed());
                continue;
            }
        };

        let href = anchor.attr_or_fail("href", "测试结果链接")?;
        let id = link_stem(href).parse::<u32>().map_err(|_| {
            ParseError::new(format!("测试结果链接应以数字ID结尾，实际为 '{}'", href))
        })?;

        let cols = row.select_all("td")?;
        if cols.len() <= END_COLUMN {
            return Err(ParseError::new(format!(
                "测试 {} 的队列行至少需要 {} 列，实际只有 {} 列",
                id,
                END_COLUMN + 1,
                cols.len()
            )));
        }

        let start_time = parse_timestamp(&cols[START_COLUMN].text_trimmed(), "测试开始时间")?;

        let end_text = cols[END_COLUMN].text_trimmed();
        let end_time = if end_text == STILL_RUNNING {
            None
        } else {
            Some(parse_timestamp(&end_text, "测试结束时间")?)
        };

        entries.push(TestQueueEntry {
            id,
            start_time,
            end_time,
        });
    }

    debug!("尝试解析 {} 行测试队列，成功 {} 条", total, entries.len());

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(text: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(text, "%d.%m.%Y %H:%M:%S").unwrap()
    }

    fn row(id: u32, start: &str, end: &str) -> String {
        format!(
            r#"<tr>
                <td><a href="/tasks/test_result/{id}.html">{id}</a></td>
                <td>Python testy</td>
                <td>{start}</td>
                <td>{end}</td>
            </tr>"#,
            id = id,
            start = start,
            end = end
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<table><thead><tr><th>ID</th><th>Typ</th><th>Začiatok</th><th>Koniec</th></tr></thead><tbody>{}</tbody></table>",
            rows.join("")
        )
    }

    #[test]
    fn test_finished_and_running_entries() {
        let html = page(&[
            row(90412, "05.11.2023 14:03:09", "05.11.2023 14:03:41"),
            row(90433, "05.11.2023 15:10:00", "05.11.2023 15:10:27"),
            row(90458, "05.11.2023 16:22:18", STILL_RUNNING),
        ]);

        let entries = parse_test_queue(&html).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, 90412);
        assert_eq!(entries[0].start_time, ts("05.11.2023 14:03:09"));
        assert_eq!(entries[0].end_time, Some(ts("05.11.2023 14:03:41")));
        assert_eq!(entries[1].end_time, Some(ts("05.11.2023 15:10:27")));
        assert_eq!(entries[2].id, 90458);
        assert_eq!(entries[2].end_time, None);
        assert!(!entries[2].is_finished());
    }

    #[test]
    fn test_empty_queue() {
        assert!(parse_test_queue(&page(&[])).unwrap().is_empty());
        assert!(parse_test_queue("<p>Žiadne testy</p>").unwrap().is_empty());
    }

    #[test]
    fn test_garbage_end_time_fails() {
        let html = page(&[row(1, "05.11.2023 14:03:09", "zajtra")]);
        let err = parse_test_queue(&html).unwrap_err();
        assert!(err.expected.contains("zajtra"));
    }

    #[test]
    fn test_short_row_fails() {
        let html = "<table><tbody><tr><td><a href=\"/tasks/test_result/5.html\">5</a></td><td>x</td></tr></tbody></table>";
        assert!(parse_test_queue(html).is_err());
    }
}
