//! 终端输入
//!
//! 基于 `inquire`：密码不回显，Ctrl-C / Esc 统一转换成 [`ListError::Interrupted`]。

use inquire::error::InquireResult;
use inquire::{required, Confirm, Password, Select, Text};

use crate::error::{ListError, Result};

/// 提示用户输入一行非空文本
pub fn prompt(label: &str) -> Result<String> {
    let answer = Text::new(label).with_validator(required!()).prompt()?;
    Ok(answer.trim().to_string())
}

/// 提示输入密码，输入内容不显示在屏幕上
pub fn prompt_password(label: &str) -> Result<String> {
    Ok(Password::new(label)
        .without_confirmation()
        .with_validator(required!())
        .prompt()?)
}

/// 是/否问题，直接回车取默认值
pub fn confirm(question: &str, default_yes: bool) -> Result<bool> {
    Ok(Confirm::new(question).with_default(default_yes).prompt()?)
}

/// 列出所有选项让用户选择一项
pub fn select_from_list<'a, T>(items: &'a [T], label: impl Fn(&T) -> String) -> Result<&'a T> {
    pick(items, label, |labels| {
        Select::new("Select:", labels)
            .raw_prompt()
            .map(|option| option.index)
    })
}

/// 把选中的下标映射回对应的项目
fn pick<'a, T>(
    items: &'a [T],
    label: impl Fn(&T) -> String,
    select: impl FnOnce(Vec<String>) -> InquireResult<usize>,
) -> Result<&'a T> {
    if items.is_empty() {
        return Err(ListError::Config("没有可供选择的项目".to_string()));
    }

    let labels = items.iter().map(label).collect();
    let index = select(labels)?;
    items
        .get(index)
        .ok_or_else(|| ListError::Config(format!("选择超出范围: {}", index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inquire::InquireError;

    #[test]
    fn test_pick_maps_index_to_item() {
        let items = vec!["Programovanie 1", "Programovanie 2", "Algebra"];

        let selected = pick(&items, |s| s.to_uppercase(), |labels| {
            assert_eq!(labels, vec!["PROGRAMOVANIE 1", "PROGRAMOVANIE 2", "ALGEBRA"]);
            Ok(1)
        })
        .unwrap();

        assert_eq!(*selected, "Programovanie 2");
    }

    #[test]
    fn test_pick_from_empty_list() {
        let items: Vec<String> = vec![];
        let result = pick(&items, |s| s.clone(), |_| panic!("不应显示空列表"));
        assert!(matches!(result, Err(ListError::Config(_))));
    }

    #[test]
    fn test_pick_interrupted() {
        let items = vec![1, 2];

        let interrupted = pick(&items, |n| n.to_string(), |_| {
            Err(InquireError::OperationInterrupted)
        });
        assert!(matches!(interrupted, Err(ListError::Interrupted)));

        let canceled = pick(&items, |n| n.to_string(), |_| Err(InquireError::OperationCanceled));
        assert!(matches!(canceled, Err(ListError::Interrupted)));
    }
}
