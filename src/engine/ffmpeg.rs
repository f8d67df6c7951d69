//! # ffmpeg 引擎
//!
//! 通过 `silenceremove` 滤镜移除整段文件中的静音。
//!
//! ## 命令格式
//! ```text
//! ffmpeg -hide_banner -nostdin -y -i <input> -af silenceremove=... <output>
//! ```
//!
//! ## 依赖关系
//! - 实现 `engine::SilenceRemover`
//! - 被 `commands/run.rs`, `commands/check.rs` 构造

use super::{RemovalRequest, SilenceRemover};
use crate::error::{DeadAirError, Result};

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// 默认 ffmpeg 可执行文件
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// ffmpeg 引擎
#[derive(Debug, Clone)]
pub struct FfmpegEngine {
    program: PathBuf,
}

impl FfmpegEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// 检查 ffmpeg 是否可用，返回版本行
    pub fn probe(&self) -> Result<String> {
        let output = self
            .command()
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.launch_error(e))?;

        if !output.status.success() {
            return Err(DeadAirError::CommandFailed {
                command: format!("{} -version", self.program.display()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    /// 完整参数列表（不含程序名）
    pub fn build_args(request: &RemovalRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-nostdin", "-y", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(request.input.clone().into_os_string());
        args.push("-af".into());
        args.push(filter_graph(request.threshold_db, request.min_silence_secs).into());
        args.push(request.output.clone().into_os_string());
        args
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        // 独立进程组：终端 Ctrl-C 只发给 deadair，正在处理的文件不会被打断
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        cmd
    }

    fn launch_error(&self, e: std::io::Error) -> DeadAirError {
        let command = self.program.display().to_string();
        if e.kind() == ErrorKind::NotFound {
            DeadAirError::CommandNotFound { command }
        } else {
            DeadAirError::CommandLaunch { command, source: e }
        }
    }
}

impl SilenceRemover for FfmpegEngine {
    fn remove_silence(&self, request: &RemovalRequest) -> Result<()> {
        let args = Self::build_args(request);
        log::debug!(
            "Running {} {}",
            self.program.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = self
            .command()
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.launch_error(e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(DeadAirError::CommandFailed {
                command: format!("{} -i {}", self.program.display(), request.input.display()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// `silenceremove` 滤镜参数
///
/// 开头不裁剪 (`start_periods=0`)，全程移除 (`stop_periods=-1`)，峰值检测。
pub fn filter_graph(threshold_db: i32, min_silence_secs: f64) -> String {
    format!(
        "silenceremove=start_periods=0:stop_periods=-1:stop_duration={}:detection=peak:stop_threshold={}dB",
        min_silence_secs, threshold_db
    )
}
