//! 课程列表解析（`/courses.html`）

use scraper::Html;
use tracing::debug;

use super::{link_stem, ElementQuery, ParseError};
use crate::models::Course;

/// 课程卡片中详情链接的文字；文字变化说明网站布局变了
pub const COURSE_DETAIL_LABEL: &str = "Zobraz detaily";

/// 解析所有课程
///
/// 缺少名称、链接或 href 的卡片会被跳过；
/// 最后一个链接不是详情链接时整个页面视为无法识别。
pub fn parse_courses(html: &str) -> Result<Vec<Course>, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let cards = root.select_all("div.period_course")?;
    let total = cards.len();
    let mut courses = Vec::with_capacity(total);

    for card in cards {
        let name = match card.select_first("h4")? {
            Some(h4) => h4.text_trimmed(),
            None => {
                debug!("课程卡片中没有 h4 名称，跳过");
                continue;
            }
        };

        let anchors = card.select_all("a")?;
        let anchor = match anchors.last() {
            Some(anchor) => anchor,
            None => {
                debug!("课程 '{}' 中没有链接，跳过", name);
                continue;
            }
        };

        let label = anchor.text_trimmed();
        if label != COURSE_DETAIL_LABEL {
            return Err(ParseError::new(format!(
                "课程 '{}' 的最后一个链接应为 '{}'，实际为 '{}'",
                name, COURSE_DETAIL_LABEL, label
            )));
        }

        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => {
                debug!("课程 '{}' 的详情链接没有 href，跳过", name);
                continue;
            }
        };

        let id = parse_course_id(href).ok_or_else(|| {
            ParseError::new(format!(
                "课程 '{}' 的详情链接应以正整数ID结尾，实际为 '{}'",
                name, href
            ))
        })?;

        courses.push(Course { id, name });
    }

    debug!("尝试解析 {} 门课程，成功 {} 门", total, courses.len());

    Ok(courses)
}

fn parse_course_id(href: &str) -> Option<u32> {
    link_stem(href).parse::<u32>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, href: &str) -> String {
        format!(
            r#"<div class="period_course">
                <h4>{}</h4>
                <p>Prednášajúci: <a href="/teachers/1.html">Učiteľ</a></p>
                <a href="{}">Zobraz detaily</a>
            </div>"#,
            name, href
        )
    }

    fn page(cards: &[String]) -> String {
        format!(
            "<html><body><div class=\"period\">{}</div></body></html>",
            cards.join("\n")
        )
    }

    #[test]
    fn test_parse_courses_in_document_order() {
        let html = page(&[
            card("Funkcionálne programovanie", "/courses/show_details/152.html"),
            card("Programovanie 2", "/courses/show_details/155.html"),
            card("Programovanie 4 - Java", "/courses/show_details/151.html"),
            card("Umelá Inteligencia", "/courses/show_details/153.html"),
        ]);

        let courses = parse_courses(&html).unwrap();

        assert_eq!(
            courses,
            vec![
                Course { id: 152, name: "Funkcionálne programovanie".to_string() },
                Course { id: 155, name: "Programovanie 2".to_string() },
                Course { id: 151, name: "Programovanie 4 - Java".to_string() },
                Course { id: 153, name: "Umelá Inteligencia".to_string() },
            ]
        );
    }

    #[test]
    fn test_malformed_cards_are_dropped() {
        let without_name = r#"<div class="period_course"><a href="/courses/show_details/7.html">Zobraz detaily</a></div>"#.to_string();
        let without_links = r#"<div class="period_course"><h4>Bez odkazu</h4></div>"#.to_string();
        let without_href = r#"<div class="period_course"><h4>Bez href</h4><a>Zobraz detaily</a></div>"#.to_string();

        let html = page(&[
            without_name,
            card("Programovanie 2", "/courses/show_details/155.html"),
            without_links,
            card("Umelá Inteligencia", "/courses/show_details/153.html"),
            without_href,
        ]);

        let courses = parse_courses(&html).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, 155);
        assert_eq!(courses[1].id, 153);
    }

    #[test]
    fn test_changed_link_label_fails_whole_page() {
        let changed = r#"<div class="period_course"><h4>Logika</h4><a href="/courses/show_details/9.html">Show details</a></div>"#.to_string();
        let html = page(&[card("Programovanie 2", "/courses/show_details/155.html"), changed]);

        let err = parse_courses(&html).unwrap_err();
        assert!(err.expected.contains("Zobraz detaily"));
        assert!(err.expected.contains("Show details"));
    }

    #[test]
    fn test_non_numeric_course_id_fails() {
        let html = page(&[card("Programovanie 2", "/courses/show_details/abc.html")]);
        assert!(parse_courses(&html).is_err());

        let html = page(&[card("Programovanie 2", "/courses/show_details/0.html")]);
        assert!(parse_courses(&html).is_err());
    }

    #[test]
    fn test_page_without_courses() {
        let courses = parse_courses("<html><body><p>Žiadne kurzy</p></body></html>").unwrap();
        assert!(courses.is_empty());
    }
}
