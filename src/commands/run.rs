//! # run 命令实现
//!
//! 在后台线程批量去静音，界面线程负责轮询事件、刷新进度条和打印日志。
//!
//! ## 功能
//! - 校验配置，检查 ffmpeg
//! - 创建输出目录
//! - Ctrl-C 请求取消（当前文件处理完后停止）
//! - 汇总表格与可选 CSV 报告
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的参数
//! - 使用 `batch/dispatch.rs` 调度批次
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/report.rs`

use crate::batch::{CancelToken, Dispatcher, ProcessResult, RunEvent, RunHandle};
use crate::cli::run::RunArgs;
use crate::engine::FfmpegEngine;
use crate::error::{DeadAirError, Result};
use crate::models::RunState;
use crate::utils::{output, progress, report};

use indicatif::ProgressBar;
use std::fs;
use std::time::Duration;

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("Dead Air Removal");

    let job = args.job.to_job();
    super::validate_job(&job)?;

    let engine = FfmpegEngine::new(&args.job.ffmpeg);
    if !args.no_probe {
        let version = engine.probe()?;
        output::print_info(&format!("Using {}", version));
    }

    fs::create_dir_all(&job.dest_dir).map_err(|e| DeadAirError::CreateDirError {
        path: job.dest_dir.display().to_string(),
        source: e,
    })?;

    output::print_info(&format!(
        "Removing dead air from '{}' files in '{}' (threshold {} dB, min silence {} s)",
        job.target_extension,
        job.source_dir.display(),
        job.threshold_db,
        job.min_silence_secs
    ));
    output::print_info(&format!("Saving into '{}'", job.dest_dir.display()));

    let dispatcher = Dispatcher::default();
    let mut handle = dispatcher.start(job, engine, args.listing)?;
    install_cancel_handler(handle.cancel_token());

    let pb = progress::create_progress_bar(0, &progress::state_message(RunState::Running, None));
    let rendered = drive(&mut handle, &pb, Duration::from_millis(args.poll_ms));
    pb.finish_and_clear();
    log::debug!("Rendered {} run events", rendered);

    let result = handle.join()?;

    output::print_separator();
    println!("{}", report::summary_table(&result));
    if let Some(table) = report::failure_table(&result) {
        output::print_header("Failed Files");
        println!("{}", table);
    }

    if let Some(path) = &args.report {
        report::write_csv(&result, path)?;
        output::print_info(&format!("Report written to '{}'", path.display()));
    }

    if result.cancelled {
        output::print_warning(&format!(
            "Run cancelled after {} of {} entries",
            result.progress.current, result.progress.total
        ));
    } else {
        output::print_done(&format!(
            "Processed {} file(s), skipped {}, failed {} ({} entries)",
            result.success,
            result.skipped,
            result.failed,
            result.total()
        ));
    }

    Ok(())
}

/// Ctrl-C 只请求取消，正在运行的 ffmpeg 不受影响
fn install_cancel_handler(token: CancelToken) {
    let result = ctrlc::set_handler(move || {
        if token.cancel() {
            log::info!("Cancellation requested from terminal");
        }
    });

    if let Err(e) = result {
        output::print_warning(&format!("Ctrl-C cancellation unavailable: {}", e));
    }
}

/// 界面线程主循环：按固定间隔取出事件并刷新显示，返回处理的事件数
fn drive(handle: &mut RunHandle, pb: &ProgressBar, interval: Duration) -> usize {
    let mut last_state = handle.state();
    let mut current: Option<String> = None;
    let mut rendered = 0;

    while !handle.is_finished() {
        for event in handle.poll(interval) {
            render(pb, event, &mut current);
            rendered += 1;
        }

        let state = handle.state();
        if state != last_state {
            log::info!("Run state: {} -> {}", last_state, state);
            if let Some(notice) = state_notice(state) {
                pb.suspend(|| output::print_warning(notice));
            }
            last_state = state;
        }

        pb.set_message(progress::state_message(state, current.as_deref()));
    }

    rendered
}

fn state_notice(state: RunState) -> Option<&'static str> {
    match state {
        RunState::Cancelling => Some("Cancel requested, finishing the current file..."),
        _ => None,
    }
}

/// 单个文件结束后的控制台消息（跳过的条目不打印）
fn finished_message(result: &ProcessResult) -> Option<String> {
    match result {
        ProcessResult::Success(out) => Some(format!(
            "Dead air removed successfully. Output saved to: {}",
            out
        )),
        ProcessResult::Failed(name, err) => Some(format!(
            "Error removing dead air from '{}': {}",
            name, err
        )),
        ProcessResult::Skipped(_) => None,
    }
}

fn render(pb: &ProgressBar, event: RunEvent, current: &mut Option<String>) {
    match event {
        RunEvent::Started { total } => {
            pb.set_length(total as u64);
            pb.suspend(|| output::print_info(&format!("{} entries in directory", total)));
        }
        RunEvent::ItemStarted { index, file_name } => {
            log::debug!("Processing entry {}: '{}'", index + 1, file_name);
            *current = Some(file_name);
        }
        RunEvent::ItemFinished(ProcessResult::Skipped(name)) => {
            log::debug!("Skipped '{}'", name);
        }
        RunEvent::ItemFinished(result) => {
            *current = None;
            if let Some(msg) = finished_message(&result) {
                pb.suspend(|| match result {
                    ProcessResult::Success(_) => output::print_success(&msg),
                    _ => output::print_error(&msg),
                });
            }
        }
        RunEvent::Progress(p) => progress::apply_progress(pb, p),
        RunEvent::Cancelled { at } => {
            log::info!("Loop stopped before entry {}", at + 1);
        }
        // 枚举失败由 join 返回的错误统一报告一次
        RunEvent::Aborted { message } => log::debug!("Run aborted: {}", message),
        RunEvent::Finished => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::runner::tests::RecordingEngine;
    use crate::batch::ListingMode;
    use crate::cli::{Cli, Commands};
    use crate::engine::{RemovalRequest, SilenceRemover};
    use crate::models::{JobConfig, Progress};
    use clap::Parser;
    use crossbeam::channel::{self, Receiver, Sender};
    use std::path::Path;
    use std::sync::Arc;

    fn parse_run(args: &[&str]) -> RunArgs {
        let mut argv = vec!["deadair", "run", "--no-probe"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(run) => run,
            _ => unreachable!(),
        }
    }

    fn populate(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"").unwrap();
        }
    }

    /// 进入第一个文件时通知测试线程，然后等待放行
    struct HeldEngine {
        entered: Sender<()>,
        gate: Receiver<()>,
    }

    impl SilenceRemover for HeldEngine {
        fn remove_silence(&self, _: &RemovalRequest) -> Result<()> {
            let _ = self.entered.send(());
            let _ = self.gate.recv();
            Ok(())
        }
    }

    #[test]
    fn test_same_directory_is_rejected_before_dispatch() {
        let tmp = tempfile::tempdir().unwrap();
        let media = tmp.path().join("media");
        let media = media.to_str().unwrap();

        let err = execute(parse_run(&["-i", media, "-o", media, "-e", ".m4a"])).unwrap_err();
        match err {
            DeadAirError::InvalidConfig(issues) => assert_eq!(issues.len(), 1),
            other => panic!("unexpected error: {}", other),
        }
        assert!(!tmp.path().join("media").exists());
    }

    #[test]
    fn test_invalid_prefix_leaves_destination_untouched() {
        let src = tempfile::tempdir().unwrap();
        populate(src.path(), &["a.m4a"]);
        let out = src.path().join("out");

        let err = execute(parse_run(&[
            "-i",
            src.path().to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "-e",
            ".m4a",
            "--prefix",
            "sub/",
        ]))
        .unwrap_err();

        assert!(matches!(err, DeadAirError::InvalidConfig(_)));
        assert!(!out.exists());
    }

    #[test]
    fn test_drive_consumes_every_event() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        populate(src.path(), &["a.m4a", "b.m4a", "c.txt"]);

        let engine = Arc::new(RecordingEngine {
            fail_on: ["b.m4a".to_string()].into_iter().collect(),
            ..Default::default()
        });
        let dispatcher = Dispatcher::default();
        let mut handle = dispatcher
            .start(
                JobConfig::new(src.path(), dst.path(), ".m4a"),
                engine.clone(),
                ListingMode::Snapshot,
            )
            .unwrap();

        let pb = ProgressBar::hidden();
        let rendered = drive(&mut handle, &pb, Duration::from_millis(100));

        // Started + 两个匹配文件各 3 个 + 跳过条目 2 个 + Finished
        assert_eq!(rendered, 10);
        assert!(handle.is_finished());
        assert_eq!(handle.state(), RunState::Idle);
        assert!(handle.poll(Duration::from_millis(10)).is_empty());
        assert_eq!(pb.position(), 3);
        assert_eq!(pb.length(), Some(3));

        let result = handle.join().unwrap();
        assert_eq!((result.success, result.failed, result.skipped), (1, 1, 1));
        assert_eq!(engine.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_drive_after_cancel_ends_idle() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        populate(src.path(), &["a.m4a", "b.m4a", "c.m4a"]);

        let (entered_tx, entered_rx) = channel::unbounded();
        let (gate_tx, gate_rx) = channel::unbounded();
        let engine = HeldEngine {
            entered: entered_tx,
            gate: gate_rx,
        };

        let dispatcher = Dispatcher::default();
        let mut handle = dispatcher
            .start(
                JobConfig::new(src.path(), dst.path(), ".m4a"),
                engine,
                ListingMode::Snapshot,
            )
            .unwrap();

        entered_rx.recv().unwrap();
        assert!(handle.cancel_token().cancel());
        assert_eq!(handle.state(), RunState::Cancelling);
        gate_tx.send(()).unwrap();

        let pb = ProgressBar::hidden();
        let rendered = drive(&mut handle, &pb, Duration::from_millis(100));

        // Started, ItemStarted, ItemFinished, Progress, Cancelled, Finished
        assert_eq!(rendered, 6);
        assert_eq!(handle.state(), RunState::Idle);
        assert_eq!(pb.position(), 1);

        let result = handle.join().unwrap();
        assert!(result.cancelled);
        assert_eq!(result.success, 1);
        assert_eq!(result.progress, Progress::new(1, 3));
    }

    #[test]
    fn test_render_tracks_current_file_and_bar() {
        let pb = ProgressBar::hidden();
        let mut current = None;

        render(&pb, RunEvent::Started { total: 4 }, &mut current);
        assert_eq!(pb.length(), Some(4));

        render(
            &pb,
            RunEvent::ItemStarted {
                index: 0,
                file_name: "a.m4a".to_string(),
            },
            &mut current,
        );
        assert_eq!(current.as_deref(), Some("a.m4a"));

        render(
            &pb,
            RunEvent::ItemFinished(ProcessResult::Success("out/DAR_a.m4a".to_string())),
            &mut current,
        );
        assert!(current.is_none());

        render(&pb, RunEvent::Progress(Progress::new(2, 5)), &mut current);
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.length(), Some(5));
    }

    #[test]
    fn test_console_messages() {
        assert_eq!(
            finished_message(&ProcessResult::Success("out/DAR_a.m4a".to_string())).unwrap(),
            "Dead air removed successfully. Output saved to: out/DAR_a.m4a"
        );
        assert_eq!(
            finished_message(&ProcessResult::Failed(
                "b.m4a".to_string(),
                "moov atom not found".to_string()
            ))
            .unwrap(),
            "Error removing dead air from 'b.m4a': moov atom not found"
        );
        assert!(finished_message(&ProcessResult::Skipped("c.txt".to_string())).is_none());

        assert!(state_notice(RunState::Cancelling).is_some());
        assert!(state_notice(RunState::Running).is_none());
        assert!(state_notice(RunState::Idle).is_none());
    }
}
