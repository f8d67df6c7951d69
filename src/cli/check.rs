//! # check 子命令 CLI 定义
//!
//! 校验作业配置、检查 ffmpeg，并列出将要处理的文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use super::job::JobArgs;

use clap::Args;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Also list entries that would be skipped
    #[arg(long, default_value_t = false)]
    pub all: bool,
}
