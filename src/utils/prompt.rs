//! # 交互提问工具
//!
//! 向用户提出 yes/no 问题并读取回答。
//!
//! ## 依赖关系
//! - 被 `session.rs` 使用
//! - 使用 `console` crate

use crate::error::{Result, ScantiffError};

use colored::Colorize;
use console::Term;

/// 交互式确认能力
///
/// 会话循环通过该 trait 提问，测试中可用脚本化回答替代终端。
pub trait Prompt {
    /// 提出 yes/no 问题，返回回答是否为肯定
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// 基于终端的交互提问器
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Prompt for TermPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.term
            .write_str(&format!("{} ", question.cyan().bold()))
            .map_err(|e| ScantiffError::InputError { source: e })?;

        let line = self
            .term
            .read_line()
            .map_err(|e| ScantiffError::InputError { source: e })?;

        Ok(is_affirmative(&line))
    }
}

/// 判断回答是否为肯定（仅接受精确的 `y` / `Y`）
pub fn is_affirmative(line: &str) -> bool {
    matches!(line, "y" | "Y")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("Y"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("Yes"));
        assert!(!is_affirmative(" y"));
        assert!(!is_affirmative("y "));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }
}
