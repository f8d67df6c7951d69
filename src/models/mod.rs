//! # 数据模型模块
//!
//! 定义作业配置、运行状态与进度。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 子模块: job, state

pub mod job;
pub mod state;

pub use job::JobConfig;
pub use state::{Progress, RunState};
