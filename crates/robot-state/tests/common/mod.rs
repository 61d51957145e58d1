//! 集成测试共享的模型与运行时工具

#![allow(dead_code)]

use robot_state::runtime::{self, LocalHost, RuntimeConfig};
use robot_state::{KinematicModel, ModelDescription};
use robot_state::model::JointSpec;
use std::f64::consts::PI;

/// 六轴机械臂的关节名称
pub const ARM_JOINTS: [&str; 6] = ["joint1", "joint2", "joint3", "joint4", "joint5", "joint6"];

/// 两个 link：`base`（原点）与 `arm`（沿 x 平移 1，无旋转）
pub fn two_link_model() -> KinematicModel {
    let desc = ModelDescription::new("two_link")
        .with_link("base")
        .with_link("arm")
        .with_joint(JointSpec::fixed("mount", "base", "arm").with_origin([1.0, 0.0, 0.0], [0.0; 3]));
    KinematicModel::from_description(&desc).unwrap()
}

/// 六轴机械臂 + 末端固定工具坐标系
pub fn six_axis_arm() -> KinematicModel {
    let desc = ModelDescription::new("six_axis")
        .with_link("base_link")
        .with_link("link1")
        .with_link("link2")
        .with_link("link3")
        .with_link("link4")
        .with_link("link5")
        .with_link("link6")
        .with_link("tool0")
        .with_joint(
            JointSpec::revolute("joint1", "base_link", "link1")
                .with_origin([0.0, 0.0, 0.123], [0.0; 3])
                .with_limits(-2.618, 2.618),
        )
        .with_joint(
            JointSpec::revolute("joint2", "link1", "link2")
                .with_origin([0.0, 0.0, 0.0], [PI / 2.0, -0.1359, -PI])
                .with_limits(0.0, 3.14),
        )
        .with_joint(
            JointSpec::revolute("joint3", "link2", "link3")
                .with_origin([0.28503, 0.0, 0.0], [0.0, 0.0, -1.7939])
                .with_limits(-2.967, 0.0),
        )
        .with_joint(
            JointSpec::revolute("joint4", "link3", "link4")
                .with_origin([-0.021984, -0.25075, 0.0], [PI / 2.0, 0.0, 0.0])
                .with_limits(-1.745, 1.745),
        )
        .with_joint(
            JointSpec::revolute("joint5", "link4", "link5")
                .with_origin([0.0, 0.0, 0.0], [-PI / 2.0, 0.0, 0.0])
                .with_limits(-1.22, 1.22),
        )
        .with_joint(
            JointSpec::continuous("joint6", "link5", "link6")
                .with_origin([0.0, -0.091, 0.0014165], [PI / 2.0, -0.087266, 0.0]),
        )
        .with_joint(JointSpec::fixed("flange", "link6", "tool0").with_origin([0.0, 0.0, 0.1], [0.0; 3]));
    KinematicModel::from_description(&desc).unwrap()
}

/// 关闭运行时并恢复确定性的测试配置（全新 host，关闭匿名后缀）
pub fn reset_runtime() {
    robot_state::stop();
    runtime::install_host(Box::new(LocalHost::new())).unwrap();
    runtime::configure(RuntimeConfig {
        anonymous: false,
        ..RuntimeConfig::default()
    })
    .unwrap();
}
