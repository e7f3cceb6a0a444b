//! 触发测试表单解析（`/tasks/task/{id}.html`）

use scraper::Html;
use tracing::debug;

use super::{ElementQuery, ParseError};
use crate::models::SubmitForm;

/// 解析触发测试所需的隐藏字段
///
/// 没有任何测试项时返回 `None`：该题目没有配置自动测试。
pub fn parse_submit_form(html: &str) -> Result<Option<SubmitForm>, ParseError> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let tests = root
        .select_all(r#"input[name="test[id][]"]"#)?
        .into_iter()
        .filter_map(|input| input.value().attr("value"))
        .map(|value| value.to_string())
        .collect::<Vec<_>>();

    if tests.is_empty() {
        debug!("页面中没有测试项，该题目没有配置自动测试");
        return Ok(None);
    }

    let task_set_id = hidden_value(&root, "test[task_set_id]")?;
    let student_id = hidden_value(&root, "test[student_id]")?;
    let select_test_type = hidden_value(&root, "select_test_type")?;

    debug!("解析到 {} 个测试项, 学生ID: {}", tests.len(), student_id);

    Ok(Some(SubmitForm {
        tests,
        task_set_id,
        student_id,
        select_test_type,
    }))
}

fn hidden_value(root: &scraper::ElementRef<'_>, name: &str) -> Result<String, ParseError> {
    let css = format!(r#"input[name="{}"]"#, name);
    let expected = format!("测试表单字段 `{}`", name);
    let input = root.select_one(&css, &expected)?;
    let value = input.attr_or_fail("value", &expected)?;
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"<html><body>
        <form id="test_form" action="/index.php/fetests/enqueue_test" method="post">
            <input type="hidden" name="test[task_set_id]" value="1043" />
            <input type="hidden" name="test[student_id]" value="2221" />
            <input type="hidden" name="select_test_type" value="python" />
            <label><input type="checkbox" name="test[id][]" value="311" checked /> Základné testy</label>
            <label><input type="checkbox" name="test[id][]" value="312" checked /> Rozšírené testy</label>
        </form>
    </body></html>"#;

    #[test]
    fn test_parse_submit_form() {
        let form = parse_submit_form(FORM).unwrap().unwrap();

        assert_eq!(
            form,
            SubmitForm {
                tests: vec!["311".to_string(), "312".to_string()],
                task_set_id: "1043".to_string(),
                student_id: "2221".to_string(),
                select_test_type: "python".to_string(),
            }
        );
    }

    #[test]
    fn test_no_test_inputs_means_no_form() {
        let html = r#"<html><body>
            <form id="test_form">
                <input type="hidden" name="test[task_set_id]" value="1043" />
                <input type="hidden" name="test[student_id]" value="2221" />
            </form>
        </body></html>"#;

        assert_eq!(parse_submit_form(html).unwrap(), None);
        assert_eq!(parse_submit_form("<html></html>").unwrap(), None);
    }

    #[test]
    fn test_missing_hidden_field_fails() {
        let html = r#"<html><body>
            <input type="hidden" name="test[task_set_id]" value="1043" />
            <input type="checkbox" name="test[id][]" value="311" />
        </body></html>"#;

        let err = parse_submit_form(html).unwrap_err();
        assert!(err.expected.contains("test[student_id]"));
    }
}
