//! # Robot State Runtime
//!
//! 进程级运行时生命周期管理
//!
//! 快照对象在访问运动学模型之前需要进程内的通信运行时已经初始化。本 crate 提供：
//!
//! - [`ensure_started`]: 幂等启动（已运行时为空操作，包括由外部启动的情况）
//! - [`shutdown`]: 关闭（未运行时为空操作）
//! - [`RuntimeGuard`]: 租约，构造时确保运行时已启动
//! - [`RuntimeHost`]: 运行时抽象，默认实现为 [`LocalHost`]（spinner 线程组）
//!
//! ## 示例
//!
//! ```rust,no_run
//! use robot_state_runtime::{RuntimeGuard, shutdown};
//!
//! let guard = RuntimeGuard::acquire()?;
//! {
//!     let _scope = guard.scope();
//!     // 访问模型...
//! }
//! drop(guard);
//! shutdown();
//! # Ok::<(), robot_state_runtime::RuntimeError>(())
//! ```

mod config;
mod error;
mod host;
mod identity;
mod lifecycle;
mod spinner;

pub use config::{DEFAULT_NODE_NAME, RuntimeConfig};
pub use error::RuntimeError;
pub use host::{LocalHost, RuntimeHost, Teardown};
pub use identity::NodeIdentity;
pub use lifecycle::{
    ActiveScope, RuntimeGuard, active_leases, config, configure, current_identity, ensure_started,
    install_host, is_running, post, shutdown,
};
pub use spinner::Job;
