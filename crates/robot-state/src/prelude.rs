//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use robot_state::prelude::*;
//! ```

pub use crate::{
    FrameGroup, LinkTransform, RobotStateWrapper, SharedModel, Snapshot, StateError,
    capture_link_poses, diagnostic_echo, start, stop,
};

// 模型层
pub use crate::{KinematicModel, ModelDescription, ModelProvider};
