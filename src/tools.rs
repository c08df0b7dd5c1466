//! # 外部工具解析与调用
//!
//! 在启动时解析三个外部协作工具（图像转换器 / 文件预览器 / 回收站工具），
//! 并封装对它们的阻塞式调用。
//!
//! ## 功能
//! - 按平台选择候选命令，取 PATH 中第一个可用者
//! - 预检：任一工具缺失即致命错误
//! - 非零退出码映射为 `CommandFailed`，由会话层决定是否继续
//!
//! ## 依赖关系
//! - 被 `main.rs`, `session.rs` 使用
//! - 使用 `error.rs`

use crate::error::{Result, ScantiffError};

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 黑白二值化阈值
const BILEVEL_THRESHOLD: &str = "40%";
/// 黑白输出尺寸上限（仅缩小，不放大）
const BILEVEL_GEOMETRY: &str = "1250x1250>";
/// 灰度输出尺寸上限（仅缩小，不放大）
const GRAYSCALE_GEOMETRY: &str = "750x750>";

/// 外部工具角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRole {
    /// 图像转换器 (ImageMagick)
    Converter,
    /// 文件预览器（系统默认打开方式）
    Opener,
    /// 回收站工具（可恢复删除）
    Trash,
}

impl ToolRole {
    /// 角色的英文描述（用于错误消息）
    pub fn describe(self) -> &'static str {
        match self {
            ToolRole::Converter => "image converter",
            ToolRole::Opener => "file opener",
            ToolRole::Trash => "trash utility",
        }
    }

    /// 按优先级排列的候选命令
    fn candidates(self) -> Vec<ToolCommand> {
        match self {
            ToolRole::Converter => vec![ToolCommand::bare("magick"), ToolCommand::bare("convert")],
            ToolRole::Opener => {
                if cfg!(target_os = "macos") {
                    vec![ToolCommand::bare("open")]
                } else if cfg!(windows) {
                    vec![ToolCommand::bare("explorer")]
                } else {
                    vec![ToolCommand::bare("xdg-open"), ToolCommand::bare("open")]
                }
            }
            ToolRole::Trash => {
                if cfg!(target_os = "macos") {
                    vec![ToolCommand::bare("trash")]
                } else {
                    vec![
                        ToolCommand::bare("trash-put"),
                        ToolCommand::bare("trash"),
                        ToolCommand::with_prefix("gio", &["trash"]),
                    ]
                }
            }
        }
    }
}

/// 单个外部命令的调用方式
#[derive(Debug, Clone)]
pub struct ToolCommand {
    /// 可执行文件名
    program: String,
    /// 固定前缀参数（如 `gio trash` 中的 "trash"）
    prefix: Vec<String>,
}

impl ToolCommand {
    fn bare(program: &str) -> Self {
        Self {
            program: program.to_string(),
            prefix: vec![],
        }
    }

    fn with_prefix(program: &str, prefix: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 构造带前缀参数的 `Command`
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix);
        cmd
    }
}

/// 解析单个角色：取 PATH 中第一个可用候选
pub fn resolve(role: ToolRole) -> Result<ToolCommand> {
    let candidates = role.candidates();

    for candidate in &candidates {
        if find_in_path(&candidate.program).is_some() {
            return Ok(candidate.clone());
        }
    }

    Err(ScantiffError::ToolNotFound {
        role: role.describe().to_string(),
        candidates: candidates
            .iter()
            .map(|c| c.program.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// 在 PATH 中查找可执行文件
fn find_in_path(program: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;

    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", program));
            if exe.is_file() {
                return Some(exe);
            }
        }
    }

    None
}

/// 会话所依赖的外部工具能力
pub trait ExternalTools {
    /// 黑白转换：二值化 + Group4 压缩，写入 `output`
    fn convert_bilevel(&self, input: &Path, output: &Path) -> Result<()>;

    /// 灰度转换：通道平均灰度 + LZW 压缩，覆盖 `output`
    fn convert_grayscale(&self, input: &Path, output: &Path) -> Result<()>;

    /// 用系统默认方式预览文件
    fn preview(&self, path: &Path) -> Result<()>;

    /// 将文件移入回收站
    fn trash(&self, path: &Path) -> Result<()>;
}

/// 基于系统命令的工具集
pub struct SystemTools {
    converter: ToolCommand,
    opener: ToolCommand,
    trasher: ToolCommand,
}

impl SystemTools {
    /// 预检并解析全部三个工具，任一缺失即返回错误
    pub fn resolve() -> Result<Self> {
        Ok(Self {
            converter: resolve(ToolRole::Converter)?,
            opener: resolve(ToolRole::Opener)?,
            trasher: resolve(ToolRole::Trash)?,
        })
    }

    /// 阻塞执行命令，非零退出码映射为 `CommandFailed`
    fn run(&self, cmd: &mut Command, action: String) -> Result<()> {
        let status = cmd.status().map_err(|e| ScantiffError::CommandLaunchError {
            command: cmd.get_program().to_string_lossy().to_string(),
            source: e,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScantiffError::CommandFailed {
                action,
                status: status.code().unwrap_or(-1),
            })
        }
    }
}

impl ExternalTools for SystemTools {
    fn convert_bilevel(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = self.converter.command();
        cmd.arg(input)
            .args(["-threshold", BILEVEL_THRESHOLD])
            .args(["-resize", BILEVEL_GEOMETRY])
            .args(["-type", "bilevel"])
            .args(["-compress", "Group4"])
            .arg(output);

        self.run(
            &mut cmd,
            format!("convert {} to black and white", input.display()),
        )
    }

    fn convert_grayscale(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = self.converter.command();
        cmd.arg(input)
            .args(["-grayscale", "Average"])
            .args(["-resize", GRAYSCALE_GEOMETRY])
            .args(["-compress", "LZW"])
            .arg(output);

        self.run(
            &mut cmd,
            format!("convert {} to grayscale", input.display()),
        )
    }

    fn preview(&self, path: &Path) -> Result<()> {
        let mut cmd = self.opener.command();
        cmd.arg(path);

        self.run(&mut cmd, format!("preview {}", path.display()))
    }

    fn trash(&self, path: &Path) -> Result<()> {
        let mut cmd = self.trasher.command();
        cmd.arg(path);

        self.run(&mut cmd, format!("move {} to trash", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
    }

    #[test]
    fn test_find_in_path_hits_and_misses() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("faketool");
        File::create(&tool).unwrap();
        #[cfg(unix)]
        make_executable(&tool);

        let old_path = env::var_os("PATH");
        env::set_var("PATH", dir.path());

        assert_eq!(find_in_path("faketool"), Some(tool));
        assert_eq!(find_in_path("missingtool"), None);

        match old_path {
            Some(p) => env::set_var("PATH", p),
            None => env::remove_var("PATH"),
        }
    }

    #[test]
    fn test_tool_command_prefix() {
        let cmd = ToolCommand::with_prefix("gio", &["trash"]).command();
        assert_eq!(cmd.get_program(), "gio");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, vec!["trash"]);
    }

    #[test]
    fn test_role_descriptions() {
        assert_eq!(ToolRole::Converter.describe(), "image converter");
        assert_eq!(ToolRole::Opener.describe(), "file opener");
        assert_eq!(ToolRole::Trash.describe(), "trash utility");
    }
}
