//! # 交互式转换会话
//!
//! 逐个文件执行 黑白转换 → 预览 → 可选灰度重转 → 可选删除原图 流程。
//!
//! ## 功能
//! - 两道跳过守卫（'-' 前缀文件名 / 输出已存在）
//! - 外部命令失败时询问是否继续，拒绝则整体中止
//! - 汇总统计供最终报告
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `discover.rs`, `tools.rs`, `utils/`

use crate::discover::Candidate;
use crate::error::{Result, ScantiffError};
use crate::tools::ExternalTools;
use crate::utils::output;
use crate::utils::prompt::Prompt;

/// 跳过候选文件的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 文件名以 '-' 开头
    DashPrefix,
    /// 输出文件已存在
    OutputExists,
}

/// 单个文件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// 已走完转换流程
    Converted,
    /// 被跳过
    Skipped(SkipReason),
}

/// 会话统计
#[derive(Debug, Default)]
pub struct SessionSummary {
    /// 走完转换流程的文件数
    pub converted: usize,
    /// 跳过的文件数
    pub skipped: usize,
    /// 移入回收站的原图数
    pub trashed: usize,
}

/// 判断候选文件是否应跳过
///
/// 守卫顺序固定：先查 '-' 前缀，再查输出是否已存在。
pub fn skip_reason(candidate: &Candidate) -> Option<SkipReason> {
    if candidate.name.starts_with('-') {
        return Some(SkipReason::DashPrefix);
    }
    if candidate.output.exists() {
        return Some(SkipReason::OutputExists);
    }
    None
}

/// 打印跳过警告
pub fn warn_skip(candidate: &Candidate, reason: SkipReason) {
    match reason {
        SkipReason::DashPrefix => output::print_warning(&format!(
            "Skipping '{}': leading '-' would be taken for an option",
            candidate.name
        )),
        SkipReason::OutputExists => output::print_warning(&format!(
            "Skipping '{}': '{}' already exists",
            candidate.name,
            candidate.output.display()
        )),
    }
}

/// 交互式转换会话
pub struct Session<'a, T: ExternalTools, P: Prompt> {
    tools: &'a T,
    prompt: &'a mut P,
    summary: SessionSummary,
}

impl<'a, T: ExternalTools, P: Prompt> Session<'a, T, P> {
    /// 创建新会话
    pub fn new(tools: &'a T, prompt: &'a mut P) -> Self {
        Self {
            tools,
            prompt,
            summary: SessionSummary::default(),
        }
    }

    /// 按枚举顺序处理全部候选文件
    pub fn run(mut self, candidates: &[Candidate]) -> Result<SessionSummary> {
        let total = candidates.len();

        for (index, candidate) in candidates.iter().enumerate() {
            output::print_info(&format!("({}/{}) {}", index + 1, total, candidate.name));

            match self.process(candidate)? {
                FileOutcome::Converted => self.summary.converted += 1,
                FileOutcome::Skipped(_) => self.summary.skipped += 1,
            }
        }

        Ok(self.summary)
    }

    /// 处理单个候选文件
    fn process(&mut self, candidate: &Candidate) -> Result<FileOutcome> {
        if let Some(reason) = skip_reason(candidate) {
            warn_skip(candidate, reason);
            return Ok(FileOutcome::Skipped(reason));
        }

        self.absorb_failure(
            self.tools
                .convert_bilevel(&candidate.input, &candidate.output),
        )?;
        self.absorb_failure(self.tools.preview(&candidate.output))?;

        if self
            .prompt
            .confirm("Try conversion to grayscale instead? [y/n]")?
        {
            self.absorb_failure(
                self.tools
                    .convert_grayscale(&candidate.input, &candidate.output),
            )?;
            self.absorb_failure(self.tools.preview(&candidate.output))?;
        }

        if self.prompt.confirm(&format!(
            "Delete old file ({})? [y/n]",
            candidate.input.display()
        ))? {
            let trashed = self.tools.trash(&candidate.input);
            if trashed.is_ok() {
                self.summary.trashed += 1;
            }
            self.absorb_failure(trashed)?;
        }

        Ok(FileOutcome::Converted)
    }

    /// 命令失败处理策略
    ///
    /// 失败时报告动作与退出码并询问是否继续；拒绝则中止整个程序，
    /// 同意则视作已成功（已有副作用保持原样，不重试，不回滚）。
    fn absorb_failure(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(ScantiffError::CommandFailed { action, status }) => {
                output::print_error(&format!(
                    "{} failed with exit status {}",
                    capitalize(&action),
                    status
                ));
                if self.prompt.confirm("Continue? [y/n]")? {
                    Ok(())
                } else {
                    Err(ScantiffError::Aborted)
                }
            }
            Err(other) => Err(other),
        }
    }
}

/// 首字母大写
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
