//! # CLI 参数定义
//!
//! 使用 `clap` 定义命令行参数。无参数调用时扫描当前目录，
//! 与原始的无标志用法保持一致。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用

use clap::Parser;
use std::path::PathBuf;

/// Scantiff - 文档照片批量转换工具
#[derive(Parser)]
#[command(name = "scantiff")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Batch-convert photographed JPEG documents into compact scanned-look TIFF files",
    long_about = None
)]
pub struct Cli {
    /// Directory to scan for JPEG files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// List planned conversions and skips without invoking any external tool
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
