//! # 批次报告
//!
//! 把逐条处理记录导出为 CSV，并在终端打印汇总表格。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs`, `commands/check.rs` 调用
//! - 使用 `batch/runner.rs` 的 `BatchResult`
//! - 使用 `csv` 写文件，`tabled` 打印表格

use crate::batch::BatchResult;
use crate::error::{DeadAirError, Result};

use std::path::Path;
use tabled::{Table, Tabled};

/// 导出逐条记录为 CSV
pub fn write_csv(result: &BatchResult, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for record in &result.records {
        wtr.serialize(record)?;
    }

    wtr.flush().map_err(|e| DeadAirError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 汇总行
#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Processed")]
    processed: usize,
    #[tabled(rename = "Skipped")]
    skipped: usize,
    #[tabled(rename = "Failed")]
    failed: usize,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Ended by")]
    ended_by: &'static str,
}

/// 失败行
#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Error")]
    error: String,
}

/// 汇总表格
pub fn summary_table(result: &BatchResult) -> String {
    let row = SummaryRow {
        processed: result.success,
        skipped: result.skipped,
        failed: result.failed,
        progress: format!(
            "{}/{} ({:.0}%)",
            result.progress.current,
            result.progress.total,
            result.progress.fraction() * 100.0
        ),
        ended_by: if result.cancelled { "cancel" } else { "completion" },
    };
    Table::new([row]).to_string()
}

/// 失败详情表格，无失败时返回 None
pub fn failure_table(result: &BatchResult) -> Option<String> {
    if result.failures.is_empty() {
        return None;
    }

    let rows: Vec<FailureRow> = result
        .failures
        .iter()
        .map(|(file, err)| FailureRow {
            file: file.clone(),
            // 只保留最后一行，ffmpeg 的错误原因通常在末尾
            error: err.lines().last().unwrap_or_default().to_string(),
        })
        .collect();
    Some(Table::new(&rows).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ProcessResult;
    use crate::models::Progress;
    use std::fs;

    fn sample() -> BatchResult {
        let mut result = BatchResult::default();
        result.merge(0, "a.m4a", &ProcessResult::Success("out/DAR_a.m4a".into()));
        result.merge(1, "b.txt", &ProcessResult::Skipped("b.txt".into()));
        result.merge(
            2,
            "c.m4a",
            &ProcessResult::Failed("c.m4a".into(), "header\nmoov atom not found".into()),
        );
        result.progress = Progress::new(3, 3);
        result
    }

    #[test]
    fn test_write_csv() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("report.csv");
        write_csv(&sample(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "index,file_name,status,output,message");
        assert_eq!(lines[1], "0,a.m4a,processed,out/DAR_a.m4a,");
        assert_eq!(lines[2], "1,b.txt,skipped,,");
        // 多行错误信息会被加引号
        assert!(lines[3].starts_with("2,c.m4a,failed,,\"header"));
    }

    #[test]
    fn test_tables() {
        let result = sample();
        let summary = summary_table(&result);
        assert!(summary.contains("Processed"));
        assert!(summary.contains("3/3 (100%)"));
        assert!(summary.contains("completion"));

        let failures = failure_table(&result).unwrap();
        assert!(failures.contains("c.m4a"));
        assert!(failures.contains("moov atom not found"));
        assert!(!failures.contains("header"));

        assert!(failure_table(&BatchResult::default()).is_none());
    }
}
