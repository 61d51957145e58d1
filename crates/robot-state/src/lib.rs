//! # Robot State
//!
//! 运动学模型的只读位姿快照。
//!
//! 对模型中的每个 link 报告其全局位置和姿态，序列化为跨进程友好的结构：
//!
//! ```text
//! { "global_link": [ [name, tx, ty, tz, qx, qy, qz, qw], ... ] }
//! ```
//!
//! # 架构
//!
//! - **模型层** (`robot-state-model`): `ModelProvider` 接口与正运动学参考实现
//! - **运行时层** (`robot-state-runtime`): 进程级运行时的一次性启动 / 显式关闭
//! - **快照层**（本 crate）: 快照构建、快照对象、诊断回显
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use robot_state::prelude::*;
//! use std::sync::Arc;
//!
//! robot_state::logging::init();
//! start("pose_bridge", &[])?;
//!
//! let desc = ModelDescription::load_from_file("arm.toml")?;
//! let model = Arc::new(KinematicModel::from_description(&desc)?);
//! let wrapper = RobotStateWrapper::with_model(model)?;
//! let snapshot = wrapper.capture_link_poses()?;
//! println!("{}", snapshot.to_json()?);
//!
//! drop(wrapper);
//! stop();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod capture;
mod echo;
mod error;
pub mod logging;
pub mod prelude;
mod snapshot;
mod wrapper;

pub use capture::{capture_link_poses, link_transform_from_matrix};
pub use echo::diagnostic_echo;
pub use error::StateError;
pub use snapshot::{FrameGroup, GLOBAL_FRAME, LinkRecord, LinkTransform, Snapshot};
pub use wrapper::{RobotStateWrapper, RobotStateWrapperBuilder, SharedModel};

// 下层 crate 通过模块路径访问
pub use robot_state_model as model;
pub use robot_state_runtime as runtime;

pub use robot_state_model::{KinematicModel, ModelDescription, ModelError, ModelProvider};
pub use robot_state_runtime::{RuntimeConfig, RuntimeError};

/// 启动进程级运行时
///
/// 已在运行时（无论由谁启动）为空操作。失败时不留下任何状态，可直接重试。
///
/// # Errors
/// - `StateError::RuntimeInit`: 名称 / 参数不合法，或运行时启动失败
pub fn start(process_name: &str, args: &[String]) -> Result<(), StateError> {
    robot_state_runtime::ensure_started(process_name, args)?;
    Ok(())
}

/// 关闭进程级运行时
///
/// 未运行时为空操作；会等待进行中的快照完成。仍存活的快照对象之后不会自动
/// 重启运行时，但可以继续采集快照（模型访问不依赖运行时的回调线程）。
pub fn stop() {
    robot_state_runtime::shutdown();
}
