//! # deadair - 批量去除音视频静音段
//!
//! 遍历一个目录，把指定扩展名的每个文件交给 ffmpeg 的 `silenceremove`
//! 滤镜处理，结果写入另一个目录。
//!
//! ## 子命令
//! - `run`   - 后台线程串行处理，Ctrl-C 在当前文件完成后取消
//! - `check` - 校验配置、检查 ffmpeg、预览处理计划
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/   (校验、枚举、执行、调度)
//!   │     ├── engine/  (外部媒体引擎)
//!   │     └── models/  (数据模型)
//!   ├── utils/      (输出、进度条、报告)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod engine;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

/// 日志级别：默认只显示警告，`-v` 信息，`-vv` 调试；`DEADAIR_LOG` 可覆盖
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("DEADAIR_LOG")
        .format_timestamp(None)
        .init();
}
