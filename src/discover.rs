//! # 候选文件发现
//!
//! 枚举工作目录中的 JPEG 文件并派生输出路径。
//!
//! ## 功能
//! - 大小写不敏感的 `*.jpg` / `*.jpeg` 匹配
//! - 稳定的枚举顺序（按路径排序）
//! - 派生 `.tif` 输出路径
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `glob` 进行模式匹配

use crate::error::{Result, ScantiffError};

use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 输入文件匹配模式
const INPUT_PATTERNS: [&str; 2] = ["*.jpg", "*.jpeg"];

/// 一个待处理的候选文件
#[derive(Debug, Clone)]
pub struct Candidate {
    /// 原始 JPEG 路径
    pub input: PathBuf,
    /// 派生的 `.tif` 输出路径
    pub output: PathBuf,
    /// 文件名（用于跳过判断与提示）
    pub name: String,
}

/// 收集目录中所有匹配的候选文件
///
/// 空匹配返回空列表而非错误。非 UTF-8 文件名不参与匹配。
pub fn collect_candidates(dir: &Path) -> Result<Vec<Candidate>> {
    if !dir.is_dir() {
        return Err(ScantiffError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let patterns: Vec<Pattern> = INPUT_PATTERNS
        .iter()
        .map(|p| Pattern::new(p).unwrap())
        .collect();

    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut candidates: Vec<Candidate> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_str()?;
            if patterns.iter().any(|p| p.matches_with(name, options)) {
                Some(Candidate {
                    input: e.path().to_path_buf(),
                    output: derive_output_path(e.path(), name),
                    name: name.to_string(),
                })
            } else {
                None
            }
        })
        .collect();

    candidates.sort_by(|a, b| a.input.cmp(&b.input));
    Ok(candidates)
}

/// 由输入文件名派生 `.tif` 输出路径
///
/// 大小写不敏感地剥离 `.jpg` / `.jpeg` 扩展名；无匹配扩展名时整体追加。
fn derive_output_path(input: &Path, name: &str) -> PathBuf {
    let stem = strip_suffix_ci(name, ".jpg")
        .or_else(|| strip_suffix_ci(name, ".jpeg"))
        .unwrap_or(name);
    input.with_file_name(format!("{}.tif", stem))
}

/// 大小写不敏感地剥离 ASCII 后缀
fn strip_suffix_ci<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let cut = name.len().checked_sub(suffix.len())?;
    if !name.is_char_boundary(cut) {
        return None;
    }
    if name[cut..].eq_ignore_ascii_case(suffix) {
        Some(&name[..cut])
    } else {
        None
    }
}
