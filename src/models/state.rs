//! # 运行状态与进度
//!
//! 批次运行状态机 (Idle / Running / Cancelling) 与进度对。
//!
//! ## 依赖关系
//! - 被 `batch/dispatch.rs` 推导
//! - 被 `commands/run.rs` 用于状态显示

use colored::{ColoredString, Colorize};

/// 批次运行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Cancelling,
}

impl RunState {
    /// 状态标签（对应运行按钮的文字）
    pub fn label(&self) -> &'static str {
        match self {
            RunState::Idle => "Run",
            RunState::Running => "Cancel",
            RunState::Cancelling => "Finishing",
        }
    }

    /// 状态提示
    pub fn hint(&self) -> &'static str {
        match self {
            RunState::Idle => "ready",
            RunState::Running => "press Ctrl-C to cancel after the current file",
            RunState::Cancelling => "finishing last file, please wait",
        }
    }

    /// 带颜色的状态标签
    pub fn badge(&self) -> ColoredString {
        match self {
            RunState::Idle => self.label().green().bold(),
            RunState::Running => self.label().red().bold(),
            RunState::Cancelling => self.label().red().dimmed(),
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
            RunState::Cancelling => write!(f, "cancelling"),
        }
    }
}

/// 进度 (已处理序号, 当前总数)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        Progress { current, total }
    }

    /// 归一化进度，总数为 0 时视为 0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64).min(1.0)
        }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} files in directory", self.current, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_fraction() {
        assert_eq!(Progress::new(0, 0).fraction(), 0.0);
        assert_eq!(Progress::new(1, 4).fraction(), 0.25);
        // 目录被并发修改时当前序号可能超过总数
        assert_eq!(Progress::new(5, 4).fraction(), 1.0);
    }

    #[test]
    fn test_progress_display() {
        assert_eq!(Progress::new(2, 3).to_string(), "2/3 files in directory");
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(RunState::default(), RunState::Idle);
        assert_eq!(RunState::Running.label(), "Cancel");
        assert_eq!(RunState::Cancelling.to_string(), "cancelling");
    }
}
