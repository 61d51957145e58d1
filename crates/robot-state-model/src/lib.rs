//! # Robot State Model
//!
//! 运动学模型层（无运行时依赖）
//!
//! ## 模块
//!
//! - `provider`: `ModelProvider` trait，快照构建器访问模型的唯一接口
//! - `description`: 模型描述（TOML / 链式构造）
//! - `model`: `KinematicModel`，`ModelProvider` 的参考实现（正运动学）
//!
//! ## 坐标约定
//!
//! 所有全局变换都以根 link 坐标系为参考。长度单位沿用模型描述中的单位，
//! 角度单位为弧度。

pub mod description;
mod error;
mod kinematics;
pub mod model;
pub mod provider;

pub use description::{JointKind, JointLimits, JointSpec, LinkSpec, ModelDescription, Origin};
pub use error::ModelError;
pub use model::KinematicModel;
pub use provider::{GlobalTransform, ModelProvider};
