//! 运行时生命周期守卫
//!
//! 进程内最多只有一个运行时实例。所有状态集中在一个 `RwLock` 单例中：
//!
//! - 写锁：启动、关闭、替换 host / 配置、租约计数
//! - 读锁：查询状态、投递回调、[`ActiveScope`]（快照进行中）
//!
//! [`shutdown`] 需要写锁，因此会等待所有 `ActiveScope` 释放后才关闭运行时。
//! 写锁只用于把 host 标记为停止，排空回调队列和回收线程在释放锁之后进行，
//! 回调中可以继续调用本模块的任何接口（包括 [`shutdown`] 本身）。
//!
//! # 租约
//!
//! [`RuntimeGuard`] 在构造时确保运行时已启动并登记一个租约，析构时注销。
//! 最后一个租约释放**不会**关闭运行时，关闭始终是显式的 [`shutdown`] 调用。
//!
//! # 死锁注意
//!
//! 持有 `ActiveScope` 的线程不能调用 [`shutdown`]、[`install_host`]、[`configure`]
//! 或释放 `RuntimeGuard`（这些操作需要写锁），也不能嵌套进入第二个 `ActiveScope`
//! （`ActiveScope` 使用公平读锁，有写者等待时会阻塞）。状态查询使用
//! `read_recursive`，在 `ActiveScope` 内调用是安全的。

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;
use crate::host::{LocalHost, RuntimeHost};
use crate::identity::NodeIdentity;
use crate::spinner::Job;
use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard};
use std::marker::PhantomData;
use std::sync::LazyLock;

struct Lifecycle {
    host: Box<dyn RuntimeHost>,
    config: RuntimeConfig,
    /// 最近一次成功启动时使用的名称和参数，供后续租约复用
    requested: Option<(String, Vec<String>)>,
    leases: usize,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            host: Box::new(LocalHost::new()),
            config: RuntimeConfig::default(),
            requested: None,
            leases: 0,
        }
    }

    fn start(&mut self, process_name: &str, args: &[String]) -> Result<(), RuntimeError> {
        if self.host.is_running() {
            tracing::debug!("Runtime already running, start request ignored");
            return Ok(());
        }

        let identity = NodeIdentity::resolve(process_name, args, self.config.anonymous)?;
        let fqn = identity.fully_qualified_name();
        let config = self.config.clone();
        self.host.start(identity, &config)?;
        self.requested = Some((process_name.to_string(), args.to_vec()));

        tracing::info!(
            "Runtime started as '{}' ({} spinner thread(s))",
            fqn,
            config.spinner_threads
        );
        Ok(())
    }

    fn default_request(&self) -> (String, Vec<String>) {
        self.requested
            .clone()
            .unwrap_or_else(|| (self.config.default_node_name.clone(), Vec::new()))
    }
}

static LIFECYCLE: LazyLock<RwLock<Lifecycle>> = LazyLock::new(|| RwLock::new(Lifecycle::new()));

/// 确保运行时已启动
///
/// 运行时已在运行（无论由守卫启动还是由外部启动）时为空操作；否则以给定名称和参数
/// 启动。启动失败不会留下任何状态，可以直接重试。
///
/// # Errors
/// - 名称 / 参数不合法（`InvalidNodeName`、`InvalidNamespace`、`InvalidRemapping`）
/// - host 启动失败（`Spawn`、`Config`、`Host`）
pub fn ensure_started(process_name: &str, args: &[String]) -> Result<(), RuntimeError> {
    let lifecycle = LIFECYCLE.upgradable_read();
    if lifecycle.host.is_running() {
        tracing::debug!("Runtime already running, start request ignored");
        return Ok(());
    }
    let mut lifecycle = RwLockUpgradableReadGuard::upgrade(lifecycle);
    lifecycle.start(process_name, args)
}

/// 关闭运行时
///
/// 未运行时为空操作。会等待进行中的 [`ActiveScope`] 全部释放。
///
/// 返回时回调队列已排空；在 spinner 回调内调用时，当前线程上的回调除外。
pub fn shutdown() {
    let teardown = {
        let mut lifecycle = LIFECYCLE.write();
        if !lifecycle.host.is_running() {
            tracing::debug!("Runtime not running, shutdown ignored");
            return;
        }
        if lifecycle.leases > 0 {
            tracing::warn!(
                "Shutting down runtime while {} lease(s) are still held",
                lifecycle.leases
            );
        }
        lifecycle.host.shutdown()
    };

    if let Some(teardown) = teardown {
        teardown();
    }
    tracing::info!("Runtime shut down");
}

/// 运行时是否正在运行
pub fn is_running() -> bool {
    LIFECYCLE.read_recursive().host.is_running()
}

/// 当前节点身份
pub fn current_identity() -> Option<NodeIdentity> {
    LIFECYCLE.read_recursive().host.identity().cloned()
}

/// 向运行时投递回调（由 spinner 线程执行）
pub fn post<F>(job: F) -> Result<(), RuntimeError>
where
    F: FnOnce() + Send + 'static,
{
    let job: Job = Box::new(job);
    LIFECYCLE.read_recursive().host.post(job)
}

/// 当前持有的租约数量
pub fn active_leases() -> usize {
    LIFECYCLE.read_recursive().leases
}

/// 当前运行时配置
pub fn config() -> RuntimeConfig {
    LIFECYCLE.read_recursive().config.clone()
}

/// 替换运行时配置（仅在运行时停止时允许）
pub fn configure(config: RuntimeConfig) -> Result<(), RuntimeError> {
    config.validate()?;
    let mut lifecycle = LIFECYCLE.write();
    if lifecycle.host.is_running() {
        return Err(RuntimeError::AlreadyRunning);
    }
    lifecycle.config = config;
    Ok(())
}

/// 替换 Runtime Host（仅在当前 host 停止时允许）
///
/// 用于接入外部运行时；新 host 若本身已在运行，视为"外部已启动"。
pub fn install_host(host: Box<dyn RuntimeHost>) -> Result<(), RuntimeError> {
    let mut lifecycle = LIFECYCLE.write();
    if lifecycle.host.is_running() {
        return Err(RuntimeError::AlreadyRunning);
    }
    lifecycle.host = host;
    lifecycle.requested = None;
    Ok(())
}

/// 运行时租约（RAII）
///
/// 构造时确保运行时已启动并登记租约，析构时注销。快照对象持有一个租约，
/// 保证在其整个生命周期内访问模型前运行时已就绪。
#[derive(Debug)]
pub struct RuntimeGuard {
    _private: (),
}

impl RuntimeGuard {
    /// 获取租约
    ///
    /// 运行时未启动时，使用最近一次成功启动的名称和参数；从未启动过则使用
    /// 配置中的默认节点名称、空参数。
    pub fn acquire() -> Result<Self, RuntimeError> {
        let mut lifecycle = LIFECYCLE.write();
        let (name, args) = lifecycle.default_request();
        lifecycle.start(&name, &args)?;
        lifecycle.leases += 1;
        Ok(Self { _private: () })
    }

    /// 以指定名称和参数获取租约（运行时已运行时参数被忽略）
    pub fn acquire_with(process_name: &str, args: &[String]) -> Result<Self, RuntimeError> {
        let mut lifecycle = LIFECYCLE.write();
        lifecycle.start(process_name, args)?;
        lifecycle.leases += 1;
        Ok(Self { _private: () })
    }

    /// 进入活动区间
    ///
    /// 返回的 [`ActiveScope`] 持有生命周期读锁，期间 [`shutdown`] 会阻塞等待。
    /// 已有写者等待时，新的区间排在写者之后，连续采集不会让关闭饿死。
    pub fn scope(&self) -> ActiveScope<'_> {
        ActiveScope {
            lifecycle: LIFECYCLE.read(),
            _guard: PhantomData,
        }
    }
}

impl Drop for RuntimeGuard {
    fn drop(&mut self) {
        let mut lifecycle = LIFECYCLE.write();
        lifecycle.leases = lifecycle.leases.saturating_sub(1);
    }
}

/// 活动区间（持有生命周期读锁）
pub struct ActiveScope<'a> {
    lifecycle: RwLockReadGuard<'static, Lifecycle>,
    _guard: PhantomData<&'a RuntimeGuard>,
}

impl ActiveScope<'_> {
    /// 运行时是否仍在运行（区间内不会变化）
    pub fn is_running(&self) -> bool {
        self.lifecycle.host.is_running()
    }
}
