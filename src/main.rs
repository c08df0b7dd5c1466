//! # Scantiff - 文档照片批量转换工具
//!
//! 将目录中拍摄的 JPEG 文档照片批量转换为压缩 TIFF，近似平板扫描效果。
//! 图像处理完全委托给外部工具（ImageMagick / 系统预览器 / 回收站工具）。
//!
//! ## 流程
//! - 启动时预检三个外部工具，任一缺失即退出
//! - 逐个文件: 黑白转换 → 预览 → 可选灰度重转 → 可选删除原图
//! - 外部命令失败时询问是否继续，拒绝则整体中止
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli.rs       (命令行参数定义)
//!   ├── discover.rs  (候选文件发现)
//!   ├── tools.rs     (外部工具解析与调用)
//!   ├── session.rs   (交互式转换会话)
//!   ├── utils/       (输出与交互工具)
//!   └── error.rs     (错误处理)
//! ```

mod cli;
mod discover;
mod error;
mod session;
mod tools;
mod utils;

use clap::Parser;
use cli::Cli;

use crate::discover::Candidate;
use crate::session::Session;
use crate::tools::SystemTools;
use crate::utils::output;
use crate::utils::prompt::TermPrompt;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

/// 执行主流程
fn run(cli: Cli) -> error::Result<()> {
    output::print_header("Batch JPEG -> TIFF Conversion");

    if cli.dry_run {
        let candidates = discover_and_report(&cli.dir)?;
        dry_run(&candidates);
        return Ok(());
    }

    // 预检外部工具
    let tools = SystemTools::resolve()?;

    let candidates = discover_and_report(&cli.dir)?;
    if candidates.is_empty() {
        return Ok(());
    }

    let mut prompt = TermPrompt::new();

    let summary = Session::new(&tools, &mut prompt).run(&candidates)?;

    output::print_separator();
    output::print_done(&format!(
        "Processed {} file(s): {} converted, {} skipped, {} original(s) moved to trash",
        candidates.len(),
        summary.converted,
        summary.skipped,
        summary.trashed
    ));

    Ok(())
}

/// 发现候选文件并报告数量
fn discover_and_report(dir: &std::path::Path) -> error::Result<Vec<Candidate>> {
    let candidates = discover::collect_candidates(dir)?;
    if candidates.is_empty() {
        output::print_warning(&format!("No JPEG files found in '{}'", dir.display()));
    } else {
        output::print_info(&format!("Found {} JPEG file(s)", candidates.len()));
    }
    Ok(candidates)
}

/// 列出计划动作而不调用任何外部工具
fn dry_run(candidates: &[Candidate]) {
    for candidate in candidates {
        match session::skip_reason(candidate) {
            Some(reason) => session::warn_skip(candidate, reason),
            None => output::print_info(&format!(
                "Would convert '{}' -> '{}'",
                candidate.input.display(),
                candidate.output.display()
            )),
        }
    }
}
