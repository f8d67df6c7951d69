//! # 作业校验闸门
//!
//! 在批次启动前检查作业配置。所有问题一次性收集并返回，而不是遇到第一个就停止。
//! 不做文件系统存在性检查，目录缺失由执行阶段的目录枚举报告。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/check.rs` 调用
//! - 使用 `models/job.rs`
//! - 使用 `regex` 检查输出前缀

use crate::models::JobConfig;

use regex::Regex;
use std::sync::LazyLock;

/// 文件名中不允许出现的字符：路径分隔符、保留字符和控制字符
static ILLEGAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("valid prefix pattern"));

/// 配置问题
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    MissingSource,
    MissingDestination,
    MissingExtension,
    SameDirectory,
    InvalidPrefix(String),
    InvalidDuration(f64),
}

impl ConfigIssue {
    /// 出问题的字段名（用于高亮对应参数）
    pub fn field(&self) -> &'static str {
        match self {
            ConfigIssue::MissingSource => "input",
            ConfigIssue::MissingDestination => "output",
            ConfigIssue::MissingExtension => "ext",
            ConfigIssue::SameDirectory => "output",
            ConfigIssue::InvalidPrefix(_) => "prefix",
            ConfigIssue::InvalidDuration(_) => "duration",
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::MissingSource => write!(f, "Missing input directory"),
            ConfigIssue::MissingDestination => write!(f, "Missing output directory"),
            ConfigIssue::MissingExtension => write!(f, "Missing file type extension"),
            ConfigIssue::SameDirectory => {
                write!(f, "Input and output should not be the same directory")
            }
            ConfigIssue::InvalidPrefix(prefix) => write!(
                f,
                "Output prefix '{}' contains characters not allowed in file names",
                prefix.escape_debug()
            ),
            ConfigIssue::InvalidDuration(secs) => {
                write!(f, "Minimum silence duration must be >= 0 seconds, got {}", secs)
            }
        }
    }
}

/// 校验作业配置，返回全部问题
pub fn validate(job: &JobConfig) -> std::result::Result<(), Vec<ConfigIssue>> {
    let mut issues = Vec::new();

    if job.source_dir.as_os_str().is_empty() {
        issues.push(ConfigIssue::MissingSource);
    }
    if job.dest_dir.as_os_str().is_empty() {
        issues.push(ConfigIssue::MissingDestination);
    }
    if job.target_extension.is_empty() {
        issues.push(ConfigIssue::MissingExtension);
    }
    if !job.source_dir.as_os_str().is_empty() && job.source_dir == job.dest_dir {
        issues.push(ConfigIssue::SameDirectory);
    }
    if !is_valid_prefix(&job.output_prefix) {
        issues.push(ConfigIssue::InvalidPrefix(job.output_prefix.clone()));
    }
    if !job.min_silence_secs.is_finite() || job.min_silence_secs < 0.0 {
        issues.push(ConfigIssue::InvalidDuration(job.min_silence_secs));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    !ILLEGAL_PREFIX.is_match(prefix)
}

/// 非阻断性提示：不影响启动，但多半不是用户想要的
pub fn advisories(job: &JobConfig) -> Vec<String> {
    use crate::models::job::{MIN_SILENCE_RANGE_SECS, THRESHOLD_RANGE_DB};

    let mut notes = Vec::new();

    if !job.target_extension.is_empty() && !job.target_extension.starts_with('.') {
        notes.push(format!(
            "Extension '{}' has no leading dot; extensions match exactly (e.g. '.{}'), so no file will be processed",
            job.target_extension, job.target_extension
        ));
    }
    if job.threshold_db < THRESHOLD_RANGE_DB.0 || job.threshold_db > THRESHOLD_RANGE_DB.1 {
        notes.push(format!(
            "Threshold {} dB is outside the usual range {}..={} dB",
            job.threshold_db, THRESHOLD_RANGE_DB.0, THRESHOLD_RANGE_DB.1
        ));
    }
    if job.min_silence_secs > MIN_SILENCE_RANGE_SECS.1 {
        notes.push(format!(
            "Minimum silence {} s is longer than the usual maximum of {} s",
            job.min_silence_secs, MIN_SILENCE_RANGE_SECS.1
        ));
    }

    notes
}
