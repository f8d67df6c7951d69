//! # check 命令实现
//!
//! 不调用引擎，只检查作业能否启动并预览处理计划。
//!
//! ## 功能
//! - 校验作业配置
//! - 检查 ffmpeg 是否可用
//! - 列出源目录并显示输入到输出的映射
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `batch/gate.rs`, `batch/listing.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::listing;
use crate::cli::check::CheckArgs;
use crate::engine::ffmpeg::{filter_graph, FfmpegEngine};
use crate::error::Result;
use crate::models::JobConfig;
use crate::utils::{output, progress};

use std::ffi::OsString;
use tabled::{Table, Tabled};

/// 计划行
#[derive(Debug, Clone, Tabled)]
struct PlanRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Action")]
    action: &'static str,
    #[tabled(rename = "Output")]
    output: String,
}

/// 执行 check 命令
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Checking Dead Air Job");

    let job = args.job.to_job();
    super::validate_job(&job)?;
    output::print_success("Job configuration is valid");

    let engine = FfmpegEngine::new(&args.job.ffmpeg);
    let spinner = progress::create_spinner("Probing ffmpeg...");
    let probe = engine.probe();
    spinner.finish_and_clear();
    match probe {
        Ok(version) => output::print_success(&format!("Found {}", version)),
        Err(e) => output::print_warning(&format!("{}", e)),
    }
    output::print_info(&format!(
        "Filter: {}",
        filter_graph(job.threshold_db, job.min_silence_secs)
    ));

    if !job.dest_dir.is_dir() {
        output::print_info(&format!(
            "Output directory '{}' will be created",
            job.dest_dir.display()
        ));
    }

    let entries = listing::list_entries(&job.source_dir)?;
    let plan = build_plan(&job, &entries);
    let matched = plan.iter().filter(|r| r.action == "process").count();

    let shown: Vec<&PlanRow> = plan
        .iter()
        .filter(|r| args.all || r.action == "process")
        .collect();
    if !shown.is_empty() {
        println!("{}", Table::new(shown));
    }

    output::print_separator();
    if matched == 0 {
        output::print_warning(&format!(
            "No '{}' files found among {} entries",
            job.target_extension,
            entries.len()
        ));
    } else {
        output::print_done(&format!(
            "{} of {} entries would be processed",
            matched,
            entries.len()
        ));
    }

    Ok(())
}

/// 根据目录条目生成处理计划
fn build_plan(job: &JobConfig, entries: &[OsString]) -> Vec<PlanRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if job.matches(name) {
                PlanRow {
                    index: i + 1,
                    entry: name.to_string_lossy().to_string(),
                    action: "process",
                    output: job.output_path(name).display().to_string(),
                }
            } else {
                PlanRow {
                    index: i + 1,
                    entry: name.to_string_lossy().to_string(),
                    action: "skip",
                    output: String::new(),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_plan() {
        let job = JobConfig::new("in", "out", ".m4a");
        let entries: Vec<OsString> = ["a.m4a", "b.txt", "c.m4a"]
            .iter()
            .map(OsString::from)
            .collect();
        let plan = build_plan(&job, &entries);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].action, "process");
        assert_eq!(
            plan[0].output,
            PathBuf::from("out").join("DAR_a.m4a").display().to_string()
        );
        assert_eq!(plan[1].action, "skip");
        assert!(plan[1].output.is_empty());
        assert_eq!(plan[2].index, 3);
        assert_eq!(
            plan[2].output,
            PathBuf::from("out").join("DAR_c.m4a").display().to_string()
        );
    }
}
