//! Spinner - 后台回调处理线程
//!
//! 运行时启动后，由 spinner 线程消费投递到运行时的回调（订阅回调、定时任务等），
//! 调用方线程不需要自己轮询。快照路径不经过 spinner。
//!
//! # 关闭语义
//!
//! 关闭时先关闭发送端，工作线程处理完队列中剩余的回调后退出，最后 join。
//! 在某个工作线程自身（回调内）关闭时跳过该线程，它在当前回调返回后自行退出。

use crate::error::RuntimeError;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

/// 投递到运行时的回调
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// spinner 线程组
pub struct Spinner {
    sender: Option<Sender<Job>>,
    handles: Vec<thread::JoinHandle<()>>,
    capacity: usize,
}

impl Spinner {
    /// 启动 spinner 线程
    ///
    /// 任意线程启动失败时，已启动的线程会被关闭并回收。
    pub fn start(threads: usize, capacity: usize, name: &str) -> Result<Self, RuntimeError> {
        if threads == 0 {
            return Err(RuntimeError::Config(
                "spinner_threads must be at least 1".to_string(),
            ));
        }
        if capacity == 0 {
            return Err(RuntimeError::Config(
                "queue_capacity must be at least 1".to_string(),
            ));
        }

        let (sender, receiver) = bounded::<Job>(capacity);
        let mut spinner = Spinner {
            sender: Some(sender),
            handles: Vec::with_capacity(threads),
            capacity,
        };

        for i in 0..threads {
            let rx = receiver.clone();
            let spawned = thread::Builder::new()
                .name(format!("{}-spinner-{}", name, i))
                .spawn(move || spin_loop(rx));
            match spawned {
                Ok(handle) => spinner.handles.push(handle),
                Err(e) => {
                    spinner.stop();
                    return Err(RuntimeError::Spawn(e));
                },
            }
        }

        Ok(spinner)
    }

    /// 投递回调（非阻塞）
    pub fn post(&self, job: Job) -> Result<(), RuntimeError> {
        let sender = self.sender.as_ref().ok_or(RuntimeError::QueueClosed)?;
        sender.try_send(job).map_err(|e| match e {
            TrySendError::Full(_) => RuntimeError::QueueFull(self.capacity),
            TrySendError::Disconnected(_) => RuntimeError::QueueClosed,
        })
    }

    /// 工作线程数量
    pub fn thread_count(&self) -> usize {
        self.handles.len()
    }

    /// 关闭队列并等待所有工作线程退出
    pub fn stop(&mut self) {
        // 关闭发送端后，工作线程在队列排空时退出
        self.sender.take();
        let current = thread::current().id();
        for handle in self.handles.drain(..) {
            if handle.thread().id() == current {
                continue;
            }
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spin_loop(rx: Receiver<Job>) {
    for job in rx.iter() {
        if catch_unwind(AssertUnwindSafe(job)).is_err() {
            tracing::warn!("Runtime callback panicked; spinner continues");
        }
    }
}
