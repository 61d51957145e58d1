//! Runtime Host 接口与本地实现
//!
//! [`RuntimeHost`] 抽象进程级通信运行时的启动/关闭。生命周期守卫只通过该 trait
//! 与运行时交互，因此可以替换为外部运行时的绑定（见 [`install_host`](crate::install_host)）。

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::identity::NodeIdentity;
use crate::spinner::{Job, Spinner};

/// 关闭后在生命周期锁之外执行的收尾工作（回收工作线程等）
pub type Teardown = Box<dyn FnOnce() + Send + 'static>;

/// Runtime Host Trait
pub trait RuntimeHost: Send + Sync {
    /// 运行时是否正在运行（无论由谁启动）
    fn is_running(&self) -> bool;

    /// 启动运行时
    ///
    /// 失败时不得留下部分状态：`is_running()` 仍返回 false。
    fn start(&mut self, identity: NodeIdentity, config: &RuntimeConfig) -> Result<(), RuntimeError>;

    /// 关闭运行时（未运行时为空操作）
    ///
    /// 返回后 `is_running()` 必须为 false。需要等待的收尾工作（例如 join 线程）
    /// 以 [`Teardown`] 返回，由调用方在释放生命周期锁后执行，这样收尾期间
    /// 仍在运行的回调可以安全地调用生命周期接口。
    fn shutdown(&mut self) -> Option<Teardown>;

    /// 当前节点身份（未运行时为 None）
    fn identity(&self) -> Option<&NodeIdentity>;

    /// 向运行时投递回调
    fn post(&self, job: Job) -> Result<(), RuntimeError>;
}

struct Running {
    identity: NodeIdentity,
    spinner: Spinner,
}

/// 本地运行时
///
/// 进程内实现：启动时创建 spinner 线程组，关闭时排空回调队列并回收线程。
#[derive(Default)]
pub struct LocalHost {
    running: Option<Running>,
}

impl LocalHost {
    /// 创建未启动的本地运行时
    pub fn new() -> Self {
        Self::default()
    }

    /// spinner 线程数（未运行时为 0）
    pub fn spinner_threads(&self) -> usize {
        self.running.as_ref().map_or(0, |r| r.spinner.thread_count())
    }
}

impl RuntimeHost for LocalHost {
    fn is_running(&self) -> bool {
        self.running.is_some()
    }

    fn start(&mut self, identity: NodeIdentity, config: &RuntimeConfig) -> Result<(), RuntimeError> {
        if self.running.is_some() {
            return Ok(());
        }
        let spinner = Spinner::start(
            config.spinner_threads,
            config.queue_capacity,
            identity.base_name(),
        )?;
        self.running = Some(Running { identity, spinner });
        Ok(())
    }

    fn shutdown(&mut self) -> Option<Teardown> {
        let mut spinner = self.running.take()?.spinner;
        Some(Box::new(move || spinner.stop()))
    }

    fn identity(&self) -> Option<&NodeIdentity> {
        self.running.as_ref().map(|r| &r.identity)
    }

    fn post(&self, job: Job) -> Result<(), RuntimeError> {
        match &self.running {
            Some(running) => running.spinner.post(job),
            None => Err(RuntimeError::NotRunning),
        }
    }
}
