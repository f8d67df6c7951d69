//! # 统一错误处理模块
//!
//! 定义 deadair 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 配置错误：运行前由校验闸门发现，不启动任务
//! - 枚举错误：源目录无法读取，整个批次中止
//! - 单文件错误：外部引擎失败，只影响当前文件
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `batch/gate.rs` 的 `ConfigIssue`

use crate::batch::gate::ConfigIssue;
use thiserror::Error;

/// deadair 统一错误类型
#[derive(Error, Debug)]
pub enum DeadAirError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    CreateDirError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 目录枚举错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Failed to list directory: {path}")]
    ListingFailed {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid job configuration ({} problem(s)): {}", .0.len(), join_issues(.0))]
    InvalidConfig(Vec<ConfigIssue>),

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to launch '{command}': {source}")]
    CommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 任务调度错误
    // ─────────────────────────────────────────────────────────────
    #[error("A batch run is already in progress")]
    RunInProgress,

    #[error("Failed to start worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Worker thread panicked while processing the batch")]
    WorkerPanicked,

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl DeadAirError {
    /// 是否为目录枚举错误（整个批次中止的那一类）
    pub fn is_enumeration(&self) -> bool {
        matches!(
            self,
            DeadAirError::DirectoryNotFound { .. } | DeadAirError::ListingFailed { .. }
        )
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DeadAirError>;
