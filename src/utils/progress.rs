//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `indicatif` crate

use crate::models::{Progress, RunState};

use indicatif::{ProgressBar, ProgressStyle};

/// 创建批次进度条（长度随目录条目数变化）
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .expect("static progress template")
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// 创建 spinner（用于不确定进度的任务）
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {elapsed_precise} {msg}")
            .expect("static spinner template")
            .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// 把进度对同步到进度条
pub fn apply_progress(pb: &ProgressBar, progress: Progress) {
    if pb.length() != Some(progress.total as u64) {
        pb.set_length(progress.total as u64);
    }
    pb.set_position(progress.current as u64);
}

/// 进度条右侧的状态文字
pub fn state_message(state: RunState, current_file: Option<&str>) -> String {
    match (state, current_file) {
        (RunState::Running, Some(name)) => format!("[{}] {}", state.badge(), name),
        _ => format!("[{}] {}", state.badge(), state.hint()),
    }
}
