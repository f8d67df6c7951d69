//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 批量移除目录中文件的静音段
//! - `check`: 校验配置、检查 ffmpeg 并预览处理计划
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: job, run, check

pub mod check;
pub mod job;
pub mod run;

use clap::{Parser, Subcommand};

/// deadair - 批量移除音视频文件中的静音段
#[derive(Parser)]
#[command(name = "deadair")]
#[command(version)]
#[command(about = "Batch-remove dead air from audio/video files with ffmpeg", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Remove dead air from every file of the chosen type in a directory
    Run(run::RunArgs),

    /// Validate the job, probe ffmpeg and preview which files would be processed
    Check(check::CheckArgs),
}
