//! # 批量处理模块
//!
//! 去静音批次的核心：校验、枚举、串行执行与后台调度。
//!
//! ## 功能
//! - 作业配置校验（一次报告全部问题）
//! - 非递归枚举源目录
//! - 串行处理与协作式取消
//! - 单工作线程调度，事件经通道回传
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `engine/` 调用外部媒体引擎
//! - 使用 `crossbeam` 传递事件

pub mod cancel;
pub mod dispatch;
pub mod gate;
pub mod listing;
pub mod runner;

pub use cancel::CancelToken;
pub use dispatch::{Dispatcher, RunHandle, DEFAULT_POLL_INTERVAL};
pub use listing::ListingMode;
pub use runner::{BatchResult, ProcessResult, RunEvent};
