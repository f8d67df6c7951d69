//! # 作业参数
//!
//! `run` 与 `check` 共用的作业配置参数，支持环境变量回退。
//!
//! ## 依赖关系
//! - 被 `cli/run.rs`, `cli/check.rs` 展开 (flatten)
//! - 转换为 `models/job.rs` 的 `JobConfig`

use crate::engine::ffmpeg::DEFAULT_FFMPEG;
use crate::models::job::{extension_of, JobConfig, DEFAULT_OUTPUT_PREFIX};

use clap::Args;
use std::path::PathBuf;

/// 作业参数
#[derive(Args, Debug, Clone)]
pub struct JobArgs {
    /// Directory containing the files to process
    #[arg(short, long, env = "DEADAIR_INPUT")]
    pub input: Option<PathBuf>,

    /// Directory to export the processed files into
    #[arg(short, long, env = "DEADAIR_OUTPUT")]
    pub output: Option<PathBuf>,

    /// File type to process, including the leading dot (e.g. '.m4a')
    #[arg(short, long, env = "DEADAIR_EXT")]
    pub ext: Option<String>,

    /// Take the file type from a sample file instead of --ext
    #[arg(long, conflicts_with = "ext")]
    pub extension_from: Option<PathBuf>,

    /// Volume level in dB below which audio is considered silence [default: -30]
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: Option<i32>,

    /// Minimum duration of silence (in seconds) to be removed [default: 0.5]
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Prefix prepended to every output file name
    #[arg(long, default_value = DEFAULT_OUTPUT_PREFIX)]
    pub prefix: String,

    /// Keep the input file names unchanged (same as --prefix "")
    #[arg(long, default_value_t = false)]
    pub no_prefix: bool,

    /// ffmpeg executable
    #[arg(long, env = "DEADAIR_FFMPEG", default_value = DEFAULT_FFMPEG)]
    pub ffmpeg: PathBuf,
}

impl JobArgs {
    /// 构建作业配置；缺失的字段留空，由校验闸门报告
    pub fn to_job(&self) -> JobConfig {
        let target_extension = match (&self.ext, &self.extension_from) {
            (Some(ext), _) => ext.clone(),
            (None, Some(sample)) => extension_of(sample),
            (None, None) => String::new(),
        };

        let mut job = JobConfig::new(
            self.input.clone().unwrap_or_default(),
            self.output.clone().unwrap_or_default(),
            target_extension,
        );

        match self.threshold {
            Some(db) => job.threshold_db = db,
            None => job.reset_threshold(),
        }
        match self.duration {
            Some(secs) => job.min_silence_secs = secs,
            None => job.reset_min_silence(),
        }
        job.output_prefix = if self.no_prefix {
            String::new()
        } else {
            self.prefix.clone()
        };

        job
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse_job(args: &[&str]) -> JobArgs {
        let mut argv = vec!["deadair", "check"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Check(check) => check.job,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_defaults() {
        let job = parse_job(&["-i", "in", "-o", "out", "-e", ".m4a"]).to_job();
        assert_eq!(job.source_dir, PathBuf::from("in"));
        assert_eq!(job.dest_dir, PathBuf::from("out"));
        assert_eq!(job.target_extension, ".m4a");
        assert_eq!(job.threshold_db, -30);
        assert_eq!(job.min_silence_secs, 0.5);
        assert_eq!(job.output_prefix, "DAR_");
    }

    #[test]
    fn test_negative_threshold_and_no_prefix() {
        let job = parse_job(&["-i", "in", "-o", "out", "-e", ".wav", "-t", "-45", "--no-prefix"])
            .to_job();
        assert_eq!(job.threshold_db, -45);
        assert_eq!(job.output_prefix, "");
    }

    #[test]
    fn test_extension_from_sample_file() {
        let job = parse_job(&["--extension-from", "clips/take1.mp4"]).to_job();
        assert_eq!(job.target_extension, ".mp4");
        assert!(job.source_dir.as_os_str().is_empty());
    }
}
