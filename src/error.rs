//! # 统一错误处理模块
//!
//! 定义 Scantiff 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Scantiff 统一错误类型
#[derive(Error, Debug)]
pub enum ScantiffError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("No {role} found in PATH (tried: {candidates})")]
    ToolNotFound { role: String, candidates: String },

    #[error("{action} failed with exit status {status}")]
    CommandFailed { action: String, status: i32 },

    #[error("Failed to launch external command '{command}'")]
    CommandLaunchError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 交互错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read user input")]
    InputError {
        #[source]
        source: std::io::Error,
    },

    #[error("Aborted by user")]
    Aborted,
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ScantiffError>;
