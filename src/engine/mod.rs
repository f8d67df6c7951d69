//! # 去静音引擎模块
//!
//! 真正的音频处理交给外部媒体引擎完成，这里只定义调用接口。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `batch/dispatch.rs` 调用
//! - 子模块: ffmpeg

pub mod ffmpeg;

pub use ffmpeg::FfmpegEngine;

use crate::error::Result;
use crate::models::JobConfig;

use std::ffi::OsStr;
use std::path::PathBuf;

/// 单个文件的去静音请求
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub threshold_db: i32,
    pub min_silence_secs: f64,
}

impl RemovalRequest {
    /// 根据作业配置构造某个目录项的请求
    pub fn for_entry(job: &JobConfig, file_name: &OsStr) -> Self {
        RemovalRequest {
            input: job.input_path(file_name),
            output: job.output_path(file_name),
            threshold_db: job.threshold_db,
            min_silence_secs: job.min_silence_secs,
        }
    }
}

/// 去静音操作：同步执行，成功或返回引擎错误文本
pub trait SilenceRemover {
    fn remove_silence(&self, request: &RemovalRequest) -> Result<()>;
}

impl<T: SilenceRemover + ?Sized> SilenceRemover for &T {
    fn remove_silence(&self, request: &RemovalRequest) -> Result<()> {
        (**self).remove_silence(request)
    }
}

impl<T: SilenceRemover + ?Sized> SilenceRemover for std::sync::Arc<T> {
    fn remove_silence(&self, request: &RemovalRequest) -> Result<()> {
        (**self).remove_silence(request)
    }
}
