//! # 协作式取消令牌
//!
//! 批次循环在每个文件之前检查一次，正在执行的外部进程不会被打断。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `batch/dispatch.rs` 使用
//! - 被 `commands/run.rs` 的 Ctrl-C 处理器触发

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的取消令牌
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消，返回是否为首次请求
    pub fn cancel(&self) -> bool {
        !self.flag.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!token.is_cancelled());
        assert!(other.cancel());
        assert!(!other.cancel());
        assert!(token.is_cancelled());
    }
}
