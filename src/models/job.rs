//! # 作业配置数据模型
//!
//! 一次批量去静音任务的全部参数：源目录、目标目录、目标扩展名、
//! 静音阈值、最短静音时长和输出前缀。
//!
//! ## 依赖关系
//! - 被 `cli/run.rs` 构建
//! - 被 `batch/gate.rs` 校验，被 `batch/runner.rs` 消费

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// 默认静音阈值 (dB)
pub const DEFAULT_THRESHOLD_DB: i32 = -30;

/// 默认最短静音时长 (秒)
pub const DEFAULT_MIN_SILENCE_SECS: f64 = 0.5;

/// 默认输出文件前缀
pub const DEFAULT_OUTPUT_PREFIX: &str = "DAR_";

/// 阈值建议范围（超出仅警告）
pub const THRESHOLD_RANGE_DB: (i32, i32) = (-30, 50);

/// 时长建议范围（超出仅警告）
pub const MIN_SILENCE_RANGE_SECS: (f64, f64) = (0.0, 10.0);

/// 批量作业配置
#[derive(Debug, Clone, PartialEq)]
pub struct JobConfig {
    /// 待处理文件所在目录
    pub source_dir: PathBuf,
    /// 处理结果输出目录
    pub dest_dir: PathBuf,
    /// 目标扩展名，包含前导点，如 ".m4a"
    pub target_extension: String,
    /// 低于此音量 (dB) 视为静音
    pub threshold_db: i32,
    /// 需要移除的最短静音时长 (秒)
    pub min_silence_secs: f64,
    /// 输出文件名前缀，可为空
    pub output_prefix: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        JobConfig {
            source_dir: PathBuf::new(),
            dest_dir: PathBuf::new(),
            target_extension: String::new(),
            threshold_db: DEFAULT_THRESHOLD_DB,
            min_silence_secs: DEFAULT_MIN_SILENCE_SECS,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl JobConfig {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        target_extension: impl Into<String>,
    ) -> Self {
        JobConfig {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            target_extension: target_extension.into(),
            ..Default::default()
        }
    }

    /// 恢复默认阈值
    pub fn reset_threshold(&mut self) {
        self.threshold_db = DEFAULT_THRESHOLD_DB;
    }

    /// 恢复默认最短静音时长
    pub fn reset_min_silence(&mut self) {
        self.min_silence_secs = DEFAULT_MIN_SILENCE_SECS;
    }

    /// 目录项是否匹配目标扩展名（区分大小写，精确匹配）
    ///
    /// 只在文件名的 UTF-8 视图上比较扩展名，路径始终用原始名称构建。
    pub fn matches(&self, file_name: impl AsRef<OsStr>) -> bool {
        file_extension(&file_name.as_ref().to_string_lossy()) == self.target_extension
    }

    /// 输出文件名 = 前缀 + 输入文件名
    pub fn output_name(&self, file_name: impl AsRef<OsStr>) -> OsString {
        let mut name = OsString::from(&self.output_prefix);
        name.push(file_name);
        name
    }

    pub fn input_path(&self, file_name: impl AsRef<OsStr>) -> PathBuf {
        self.source_dir.join(file_name.as_ref())
    }

    pub fn output_path(&self, file_name: impl AsRef<OsStr>) -> PathBuf {
        self.dest_dir.join(self.output_name(file_name))
    }
}

/// 提取文件名扩展名（含前导点）
///
/// 以最后一个点为界；点文件（如 `.bashrc`）开头的点不算扩展名分隔符。
/// 没有扩展名时返回空串。
pub fn file_extension(file_name: &str) -> &str {
    let stem_start = file_name.len() - file_name.trim_start_matches('.').len();
    match file_name[stem_start..].rfind('.') {
        Some(pos) => &file_name[stem_start + pos..],
        None => "",
    }
}

/// 从样例文件路径取扩展名
pub fn extension_of(sample: &Path) -> String {
    sample
        .file_name()
        .map(|n| file_extension(&n.to_string_lossy()).to_string())
        .unwrap_or_default()
}
