//! # run 子命令 CLI 定义
//!
//! 批量移除目录中文件的静音段
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use super::job::JobArgs;
use crate::batch::{ListingMode, DEFAULT_POLL_INTERVAL};

use clap::Args;
use std::path::PathBuf;

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// How the progress total is computed
    #[arg(long, value_enum, default_value = "snapshot")]
    pub listing: ListingMode,

    /// Console polling interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64, value_parser = clap::value_parser!(u64).range(10..=5000))]
    pub poll_ms: u64,

    /// Write a per-file CSV report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip the ffmpeg availability check before starting
    #[arg(long, default_value_t = false)]
    pub no_probe: bool,
}
