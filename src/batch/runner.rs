//! # 批量执行器
//!
//! 逐个处理源目录中的条目：匹配扩展名的文件交给去静音引擎，其余跳过。
//!
//! ## 功能
//! - 严格串行，一次只处理一个文件
//! - 每个条目之后上报进度（跳过的条目同样计数）
//! - 每个条目之前检查取消令牌
//! - 单个文件失败不会中止批次；目录枚举失败则整个批次中止
//!
//! ## 依赖关系
//! - 被 `batch/dispatch.rs` 在工作线程中调用
//! - 使用 `batch/listing.rs` 枚举目录
//! - 使用 `engine::SilenceRemover` 处理文件

use super::cancel::CancelToken;
use super::listing::{self, ListingMode};
use crate::engine::{RemovalRequest, SilenceRemover};
use crate::error::{DeadAirError, Result};
use crate::models::{JobConfig, Progress};

use serde::Serialize;
use std::ffi::OsStr;

/// 单个条目处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 处理成功（输出文件路径）
    Success(String),
    /// 跳过（扩展名不匹配）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件名, 错误信息)
}

/// 单个条目的记录，用于报告导出
#[derive(Debug, Clone, Serialize)]
pub struct ItemRecord {
    pub index: usize,
    pub file_name: String,
    pub status: &'static str,
    pub output: String,
    pub message: String,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
    /// 逐条记录
    pub records: Vec<ItemRecord>,
    /// 最终进度
    pub progress: Progress,
    /// 是否因取消而提前结束
    pub cancelled: bool,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, index: usize, file_name: &str, result: &ProcessResult) {
        let (status, output, message) = match result {
            ProcessResult::Success(out) => {
                self.success += 1;
                ("processed", out.clone(), String::new())
            }
            ProcessResult::Skipped(_) => {
                self.skipped += 1;
                ("skipped", String::new(), String::new())
            }
            ProcessResult::Failed(name, err) => {
                self.failed += 1;
                self.failures.push((name.clone(), err.clone()));
                ("failed", String::new(), err.clone())
            }
        };
        self.records.push(ItemRecord {
            index,
            file_name: file_name.to_string(),
            status,
            output,
            message,
        });
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 执行器发出的事件
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// 枚举完成，开始处理
    Started { total: usize },
    /// 开始处理某个匹配文件
    ItemStarted { index: usize, file_name: String },
    /// 条目处理完毕
    ItemFinished(ProcessResult),
    /// 进度更新
    Progress(Progress),
    /// 在第 `at` 个条目之前停止
    Cancelled { at: usize },
    /// 目录枚举失败，批次中止
    Aborted { message: String },
    /// 工作线程结束，之后不会再有事件
    Finished,
}

/// 批量执行器
pub struct BatchRunner<E> {
    engine: E,
    mode: ListingMode,
}

impl<E: SilenceRemover> BatchRunner<E> {
    /// 创建新的批量执行器
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            mode: ListingMode::default(),
        }
    }

    /// 设置进度总数的计算方式
    pub fn listing_mode(mut self, mode: ListingMode) -> Self {
        self.mode = mode;
        self
    }

    /// 串行处理源目录
    ///
    /// 仅在目录枚举失败时返回错误；单个文件的失败记录在结果中。
    pub fn run<F>(&self, job: &JobConfig, cancel: &CancelToken, mut emit: F) -> Result<BatchResult>
    where
        F: FnMut(RunEvent),
    {
        let entries = listing::list_entries(&job.source_dir)?;
        let mut total = entries.len();
        let mut result = BatchResult {
            progress: Progress::new(0, total),
            ..Default::default()
        };

        emit(RunEvent::Started { total });

        for (index, entry) in entries.iter().enumerate() {
            if cancel.is_cancelled() {
                log::info!("Cancelled before entry {} of {}", index + 1, total);
                result.cancelled = true;
                emit(RunEvent::Cancelled { at: index });
                break;
            }

            let file_name = entry.to_string_lossy().to_string();
            let outcome = if job.matches(entry) {
                emit(RunEvent::ItemStarted {
                    index,
                    file_name: file_name.clone(),
                });
                self.process(job, entry, &file_name)
            } else {
                ProcessResult::Skipped(file_name.clone())
            };

            result.merge(index, &file_name, &outcome);
            emit(RunEvent::ItemFinished(outcome));

            if self.mode == ListingMode::Live {
                total = listing::count_entries(&job.source_dir)?;
            }
            result.progress = Progress::new(index + 1, total);
            emit(RunEvent::Progress(result.progress));
        }

        Ok(result)
    }

    /// `entry` 用于构建路径，`file_name` 只用于显示
    fn process(&self, job: &JobConfig, entry: &OsStr, file_name: &str) -> ProcessResult {
        let request = RemovalRequest::for_entry(job, entry);
        match self.engine.remove_silence(&request) {
            Ok(()) => ProcessResult::Success(request.output.display().to_string()),
            Err(DeadAirError::CommandFailed { stderr, .. }) => {
                ProcessResult::Failed(file_name.to_string(), stderr)
            }
            Err(e @ DeadAirError::CommandNotFound { .. }) => {
                ProcessResult::Failed(file_name.to_string(), e.to_string())
            }
            Err(e) => {
                log::warn!("Unexpected error while processing '{}': {}", file_name, e);
                ProcessResult::Failed(
                    file_name.to_string(),
                    format!("Unexpected error: {}", e),
                )
            }
        }
    }
}
