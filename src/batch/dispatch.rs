//! # 后台调度
//!
//! 把批量执行器放到唯一的后台工作线程上运行，界面线程不被阻塞。
//!
//! ## 功能
//! - 同一时刻最多一个批次（重复启动返回 `RunInProgress`）
//! - 工作线程产生的事件经有界通道送回界面线程，由界面线程定时轮询
//! - 运行状态由句柄推导，界面层只读
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `batch/runner.rs` 执行批次
//! - 使用 `crossbeam` 通道

use super::cancel::CancelToken;
use super::listing::ListingMode;
use super::runner::{BatchResult, BatchRunner, RunEvent};
use crate::engine::SilenceRemover;
use crate::error::{DeadAirError, Result};
use crate::models::{JobConfig, RunState};

use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 默认轮询间隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 事件队列容量
pub const EVENT_QUEUE_CAPACITY: usize = 256;

/// 批次调度器
pub struct Dispatcher {
    busy: Arc<AtomicBool>,
    capacity: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(EVENT_QUEUE_CAPACITY)
    }
}

impl Dispatcher {
    pub fn new(capacity: usize) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(false)),
            capacity: capacity.max(1),
        }
    }

    /// 在后台线程启动批次
    pub fn start<E>(&self, job: JobConfig, engine: E, mode: ListingMode) -> Result<RunHandle>
    where
        E: SilenceRemover + Send + 'static,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DeadAirError::RunInProgress);
        }

        let (tx, rx) = channel::bounded(self.capacity);
        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let busy = BusyGuard(self.busy.clone());

        let thread = thread::Builder::new()
            .name("deadair-batch".into())
            .spawn(move || {
                log::debug!("Batch worker started for '{}'", job.source_dir.display());
                let runner = BatchRunner::new(engine).listing_mode(mode);
                let result = runner.run(&job, &worker_cancel, |event| {
                    // 接收端已关闭时丢弃事件
                    let _ = tx.send(event);
                });
                if let Err(e) = &result {
                    let _ = tx.send(RunEvent::Aborted {
                        message: e.to_string(),
                    });
                }
                // 先释放占用标记，再发送结束事件
                drop(busy);
                let _ = tx.send(RunEvent::Finished);
                result
            })
            .map_err(DeadAirError::WorkerSpawn)?;

        Ok(RunHandle {
            events: rx,
            cancel,
            thread: Some(thread),
            finished: false,
        })
    }
}

/// 工作线程退出（含 panic）时清除占用标记
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// 运行中批次的句柄
pub struct RunHandle {
    events: Receiver<RunEvent>,
    cancel: CancelToken,
    thread: Option<JoinHandle<Result<BatchResult>>>,
    finished: bool,
}

impl RunHandle {
    /// 取消令牌的克隆（供 Ctrl-C 处理器使用）
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 当前运行状态
    pub fn state(&self) -> RunState {
        if self.finished {
            RunState::Idle
        } else if self.cancel.is_cancelled() {
            RunState::Cancelling
        } else {
            RunState::Running
        }
    }

    /// 工作线程是否已发出结束事件
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// 取出待处理事件，最多等待一个轮询间隔
    pub fn poll(&mut self, interval: Duration) -> Vec<RunEvent> {
        let mut drained = Vec::new();
        if self.finished {
            return drained;
        }

        match self.events.recv_timeout(interval) {
            Ok(event) => drained.push(event),
            Err(RecvTimeoutError::Timeout) => return drained,
            Err(RecvTimeoutError::Disconnected) => {
                self.finished = true;
                return drained;
            }
        }
        drained.extend(self.events.try_iter());

        if drained.contains(&RunEvent::Finished) {
            self.finished = true;
        }
        drained
    }

    /// 等待工作线程结束并取回结果（未读事件被丢弃）
    pub fn join(mut self) -> Result<BatchResult> {
        while !self.finished {
            match self.events.recv() {
                Ok(RunEvent::Finished) | Err(_) => self.finished = true,
                Ok(_) => {}
            }
        }

        match self.thread.take() {
            Some(handle) => handle.join().map_err(|_| DeadAirError::WorkerPanicked)?,
            None => Err(DeadAirError::WorkerPanicked),
        }
    }
}
