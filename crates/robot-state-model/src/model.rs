//! 运动学模型
//!
//! [`KinematicModel`] 是 [`ModelProvider`] 的参考实现：由 [`ModelDescription`] 校验构建，
//! 持有关节位置，按需计算任意 link 的全局变换（正运动学）。
//!
//! # link 顺序
//!
//! 模型的原生 link 顺序是从根 link 出发的深度优先前序遍历，同一父 link 的子节点按
//! joint 声明顺序访问。这个顺序在模型构建后固定不变。

use crate::description::{JointKind, JointLimits, ModelDescription};
use crate::error::ModelError;
use crate::kinematics::{AXIS_NORM_EPSILON, is_finite, joint_motion, origin_to_isometry};
use crate::provider::{GlobalTransform, ModelProvider};
use nalgebra::{Isometry3, Unit, Vector3};
use std::collections::HashMap;

/// 已校验的关节
#[derive(Debug, Clone)]
struct JointNode {
    name: String,
    kind: JointKind,
    /// 父 link 在原生顺序中的索引
    parent: usize,
    origin: Isometry3<f64>,
    axis: Unit<Vector3<f64>>,
    limits: Option<JointLimits>,
    default_position: f64,
}

impl JointNode {
    /// 按关节类型处理限位（continuous / fixed 不受限）
    fn bounded(&self, value: f64) -> f64 {
        match (self.kind, self.limits) {
            (JointKind::Revolute | JointKind::Prismatic, Some(limits)) => {
                value.clamp(limits.lower, limits.upper)
            },
            _ => value,
        }
    }
}

/// 运动学模型
#[derive(Debug, Clone)]
pub struct KinematicModel {
    name: String,
    /// 原生顺序的 link 名称
    links: Vec<String>,
    link_index: HashMap<String, usize>,
    /// 每个 link（原生顺序）的父 joint
    parent_joint: Vec<Option<usize>>,
    /// joint 按声明顺序存放
    joints: Vec<JointNode>,
    joint_index: HashMap<String, usize>,
    positions: Vec<f64>,
}

impl KinematicModel {
    /// 从描述构建模型
    ///
    /// # Errors
    /// 描述不构成一棵合法的运动学树时返回对应的 `ModelError`。
    pub fn from_description(desc: &ModelDescription) -> Result<Self, ModelError> {
        if desc.links.is_empty() {
            return Err(ModelError::EmptyModel);
        }

        // 1. link 名称唯一
        let mut declared: HashMap<&str, usize> = HashMap::with_capacity(desc.links.len());
        for (i, link) in desc.links.iter().enumerate() {
            if declared.insert(link.name.as_str(), i).is_some() {
                return Err(ModelError::DuplicateLink(link.name.clone()));
            }
        }

        // 2. joint 校验，记录每个 link 的父 joint 和子 joint 列表（声明索引）
        let mut joint_names: HashMap<&str, usize> = HashMap::with_capacity(desc.joints.len());
        let mut parent_of: Vec<Option<usize>> = vec![None; desc.links.len()];
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); desc.links.len()];
        for (j, joint) in desc.joints.iter().enumerate() {
            if joint_names.insert(joint.name.as_str(), j).is_some() {
                return Err(ModelError::DuplicateJoint(joint.name.clone()));
            }
            let parent = *declared
                .get(joint.parent.as_str())
                .ok_or_else(|| ModelError::UnknownLink(joint.parent.clone()))?;
            let child = *declared
                .get(joint.child.as_str())
                .ok_or_else(|| ModelError::UnknownLink(joint.child.clone()))?;
            if parent == child {
                return Err(invalid(&joint.name, "parent and child are the same link"));
            }
            if let Some(first) = parent_of[child] {
                return Err(ModelError::MultipleParents {
                    link: joint.child.clone(),
                    first: desc.joints[first].name.clone(),
                    second: joint.name.clone(),
                });
            }
            parent_of[child] = Some(j);
            children[parent].push(j);
        }

        // 3. 唯一根
        let roots: Vec<usize> = (0..desc.links.len()).filter(|&i| parent_of[i].is_none()).collect();
        if roots.len() != 1 {
            return Err(ModelError::RootCount {
                count: roots.len(),
                links: roots.iter().map(|&i| desc.links[i].name.clone()).collect(),
            });
        }

        // 4. 深度优先前序遍历，得到原生顺序
        let mut order: Vec<usize> = Vec::with_capacity(desc.links.len());
        let mut stack = vec![roots[0]];
        while let Some(link) = stack.pop() {
            order.push(link);
            // 逆序压栈，保证按声明顺序弹出
            for &j in children[link].iter().rev() {
                let child = declared[desc.joints[j].child.as_str()];
                stack.push(child);
            }
        }
        if order.len() != desc.links.len() {
            let mut visited = vec![false; desc.links.len()];
            for &i in &order {
                visited[i] = true;
            }
            let first = visited.iter().position(|v| !v).unwrap_or_default();
            return Err(ModelError::Unreachable(desc.links[first].name.clone()));
        }

        let mut native_of_declared = vec![0usize; desc.links.len()];
        for (native, &declared_idx) in order.iter().enumerate() {
            native_of_declared[declared_idx] = native;
        }

        // 5. 构建 joint 节点
        let mut joints = Vec::with_capacity(desc.joints.len());
        for joint in &desc.joints {
            let parent = native_of_declared[declared[joint.parent.as_str()]];
            joints.push(build_joint(joint, parent)?);
        }

        let links: Vec<String> = order.iter().map(|&i| desc.links[i].name.clone()).collect();
        let link_index = links.iter().enumerate().map(|(i, name)| (name.clone(), i)).collect();
        let parent_joint = order.iter().map(|&i| parent_of[i]).collect();
        let joint_index = joints.iter().enumerate().map(|(j, node)| (node.name.clone(), j)).collect();
        let positions = joints.iter().map(|node| node.default_position).collect();

        tracing::debug!(
            "Built kinematic model '{}': {} links, {} joints",
            desc.name,
            links.len(),
            joints.len()
        );

        Ok(Self {
            name: desc.name.clone(),
            links,
            link_index,
            parent_joint,
            joints,
            joint_index,
            positions,
        })
    }

    /// 模型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// link 数量
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// 原生顺序的 link 名称
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// 根 link
    pub fn root_link(&self) -> &str {
        &self.links[0]
    }

    /// 是否包含 link
    pub fn has_link(&self, link: &str) -> bool {
        self.link_index.contains_key(link)
    }

    /// 所有 joint 名称（声明顺序）
    pub fn joint_names(&self) -> Vec<&str> {
        self.joints.iter().map(|j| j.name.as_str()).collect()
    }

    /// 有位置变量的 joint 名称（声明顺序）
    pub fn variable_names(&self) -> Vec<&str> {
        self.joints
            .iter()
            .filter(|j| j.kind.is_actuated())
            .map(|j| j.name.as_str())
            .collect()
    }

    /// 读取关节位置
    pub fn joint_position(&self, joint: &str) -> Result<f64, ModelError> {
        let j = self.joint(joint)?;
        Ok(self.positions[j])
    }

    /// 设置关节位置
    ///
    /// 超出限位的值被截断到限位内，返回实际生效的值。
    ///
    /// # Errors
    /// - `ModelError::UnknownJoint`: joint 不存在
    /// - `ModelError::FixedJoint`: 固定关节
    /// - `ModelError::NonFinitePosition`: NaN / ∞
    pub fn set_joint_position(&mut self, joint: &str, value: f64) -> Result<f64, ModelError> {
        let (j, applied) = self.check_position(joint, value)?;
        self.positions[j] = applied;
        Ok(applied)
    }

    /// 批量设置关节位置
    ///
    /// 先校验全部输入，任意一项失败时模型保持不变。
    pub fn set_joint_positions<I, K>(&mut self, positions: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut updates = Vec::new();
        for (joint, value) in positions {
            updates.push(self.check_position(joint.as_ref(), value)?);
        }
        for (j, applied) in updates {
            self.positions[j] = applied;
        }
        Ok(())
    }

    /// 恢复所有关节到初始位置
    pub fn reset_to_defaults(&mut self) {
        for (position, node) in self.positions.iter_mut().zip(&self.joints) {
            *position = node.default_position;
        }
    }

    /// 计算 link 的全局变换
    pub fn global_transform(&self, link: &str) -> Result<Isometry3<f64>, ModelError> {
        let mut current = *self
            .link_index
            .get(link)
            .ok_or_else(|| ModelError::UnknownLink(link.to_string()))?;

        // 从 link 向根回溯收集 joint，再自根向下累乘
        let mut path = Vec::new();
        while let Some(j) = self.parent_joint[current] {
            path.push(j);
            current = self.joints[j].parent;
        }

        let mut transform = Isometry3::identity();
        for &j in path.iter().rev() {
            let node = &self.joints[j];
            transform *= node.origin;
            transform *= joint_motion(node.kind, &node.axis, self.positions[j]);
        }

        if !is_finite(&transform) {
            return Err(ModelError::NonFiniteTransform(link.to_string()));
        }
        Ok(transform)
    }

    fn joint(&self, joint: &str) -> Result<usize, ModelError> {
        self.joint_index
            .get(joint)
            .copied()
            .ok_or_else(|| ModelError::UnknownJoint(joint.to_string()))
    }

    fn check_position(&self, joint: &str, value: f64) -> Result<(usize, f64), ModelError> {
        let j = self.joint(joint)?;
        let node = &self.joints[j];
        if !node.kind.is_actuated() {
            return Err(ModelError::FixedJoint(joint.to_string()));
        }
        if !value.is_finite() {
            return Err(ModelError::NonFinitePosition {
                joint: joint.to_string(),
                value,
            });
        }
        let applied = node.bounded(value);
        if applied != value {
            tracing::debug!(
                "Joint '{}' position {} clamped to {}",
                joint,
                value,
                applied
            );
        }
        Ok((j, applied))
    }
}

impl ModelProvider for KinematicModel {
    fn link_names(&self) -> Vec<String> {
        self.links.clone()
    }

    fn global_link_transform(&self, link: &str) -> Result<GlobalTransform, ModelError> {
        self.global_transform(link).map(|iso| iso.to_homogeneous())
    }
}

fn invalid(joint: &str, reason: impl Into<String>) -> ModelError {
    ModelError::InvalidJoint {
        joint: joint.to_string(),
        reason: reason.into(),
    }
}

fn build_joint(spec: &crate::description::JointSpec, parent: usize) -> Result<JointNode, ModelError> {
    let numbers = spec.origin.xyz.iter().chain(&spec.origin.rpy).chain(&spec.axis);
    if numbers.into_iter().any(|v| !v.is_finite()) {
        return Err(invalid(&spec.name, "origin and axis must be finite"));
    }

    let axis_vec = Vector3::from(spec.axis);
    let axis = if spec.kind.is_actuated() {
        Unit::try_new(axis_vec, AXIS_NORM_EPSILON)
            .ok_or_else(|| invalid(&spec.name, "axis must be non-zero"))?
    } else {
        // 固定关节不使用轴
        Unit::try_new(axis_vec, AXIS_NORM_EPSILON).unwrap_or_else(Vector3::z_axis)
    };

    let limits = match (spec.kind, spec.limits) {
        (JointKind::Revolute | JointKind::Prismatic, Some(limits)) => {
            if !limits.lower.is_finite() || !limits.upper.is_finite() {
                return Err(invalid(&spec.name, "limits must be finite"));
            }
            if limits.lower > limits.upper {
                return Err(invalid(
                    &spec.name,
                    format!("lower limit {} exceeds upper limit {}", limits.lower, limits.upper),
                ));
            }
            Some(limits)
        },
        _ => None,
    };

    let default_position = match (spec.position, limits) {
        (_, _) if !spec.kind.is_actuated() => 0.0,
        (Some(p), _) if !p.is_finite() => {
            return Err(invalid(&spec.name, "initial position must be finite"));
        },
        (Some(p), Some(l)) if p < l.lower || p > l.upper => {
            return Err(invalid(
                &spec.name,
                format!("initial position {} outside limits [{}, {}]", p, l.lower, l.upper),
            ));
        },
        (Some(p), _) => p,
        (None, Some(l)) if 0.0 < l.lower || 0.0 > l.upper => (l.lower + l.upper) / 2.0,
        (None, _) => 0.0,
    };

    Ok(JointNode {
        name: spec.name.clone(),
        kind: spec.kind,
        parent,
        origin: origin_to_isometry(&spec.origin),
        axis,
        limits,
        default_position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::JointSpec;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn two_link() -> ModelDescription {
        ModelDescription::new("two_link")
            .with_link("base")
            .with_link("arm")
            .with_joint(
                JointSpec::revolute("shoulder", "base", "arm")
                    .with_origin([1.0, 0.0, 0.0], [0.0, 0.0, 0.0])
                    .with_limits(-FRAC_PI_2, FRAC_PI_2),
            )
    }

    /// base ─┬─ upper ── lower
    ///       └─ camera
    fn branching() -> ModelDescription {
        // 声明顺序故意打乱
        ModelDescription::new("branching")
            .with_link("lower")
            .with_link("camera")
            .with_link("base")
            .with_link("upper")
            .with_joint(JointSpec::revolute("j1", "base", "upper").with_origin([0.0, 0.0, 0.5], [0.0; 3]))
            .with_joint(JointSpec::fixed("cam_mount", "base", "camera").with_origin([0.1, 0.0, 0.0], [0.0; 3]))
            .with_joint(JointSpec::revolute("j2", "upper", "lower").with_origin([0.0, 0.0, 0.4], [0.0; 3]))
    }

    #[test]
    fn test_two_link_defaults() {
        let model = KinematicModel::from_description(&two_link()).unwrap();
        assert_eq!(model.name(), "two_link");
        assert_eq!(model.link_count(), 2);
        assert_eq!(model.root_link(), "base");
        assert_eq!(model.joint_position("shoulder").unwrap(), 0.0);

        let arm = model.global_transform("arm").unwrap();
        assert_eq!(arm.translation.vector, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(model.global_transform("base").unwrap(), Isometry3::identity());
    }

    #[test]
    fn test_native_order_is_depth_first() {
        let model = KinematicModel::from_description(&branching()).unwrap();
        assert_eq!(model.links(), &["base", "upper", "lower", "camera"]);
        assert_eq!(model.link_names(), vec!["base", "upper", "lower", "camera"]);
        assert_eq!(model.joint_names(), vec!["j1", "cam_mount", "j2"]);
        assert_eq!(model.variable_names(), vec!["j1", "j2"]);
    }

    #[test]
    fn test_forward_kinematics_chain() {
        let desc = ModelDescription::new("planar")
            .with_link("base")
            .with_link("l1")
            .with_link("l2")
            .with_joint(JointSpec::continuous("j1", "base", "l1"))
            .with_joint(JointSpec::continuous("j2", "l1", "l2").with_origin([1.0, 0.0, 0.0], [0.0; 3]));
        let mut model = KinematicModel::from_description(&desc).unwrap();
        model.set_joint_position("j1", FRAC_PI_2).unwrap();

        // j1 旋转 90° 后，l2 原点从 (1,0,0) 移到 (0,1,0)
        let l2 = model.global_transform("l2").unwrap();
        assert_relative_eq!(l2.translation.vector.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(l2.translation.vector.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(l2.rotation.angle(), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_prismatic_joint() {
        let desc = ModelDescription::new("slider")
            .with_link("rail")
            .with_link("carriage")
            .with_joint(
                JointSpec::prismatic("slide", "rail", "carriage")
                    .with_axis([2.0, 0.0, 0.0])
                    .with_limits(0.0, 0.5),
            );
        let mut model = KinematicModel::from_description(&desc).unwrap();
        model.set_joint_position("slide", 0.3).unwrap();
        let carriage = model.global_transform("carriage").unwrap();
        // 轴会被归一化
        assert_relative_eq!(carriage.translation.vector.x, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_set_position_clamps_to_limits() {
        let mut model = KinematicModel::from_description(&two_link()).unwrap();
        let applied = model.set_joint_position("shoulder", 10.0).unwrap();
        assert_eq!(applied, FRAC_PI_2);
        assert_eq!(model.joint_position("shoulder").unwrap(), FRAC_PI_2);
    }

    #[test]
    fn test_set_position_errors() {
        let mut model = KinematicModel::from_description(&branching()).unwrap();
        assert!(matches!(
            model.set_joint_position("nope", 0.0),
            Err(ModelError::UnknownJoint(_))
        ));
        assert!(matches!(
            model.set_joint_position("cam_mount", 0.0),
            Err(ModelError::FixedJoint(_))
        ));
        assert!(matches!(
            model.set_joint_position("j1", f64::NAN),
            Err(ModelError::NonFinitePosition { .. })
        ));
    }

    #[test]
    fn test_set_joint_positions_is_all_or_nothing() {
        let mut model = KinematicModel::from_description(&branching()).unwrap();
        let result = model.set_joint_positions([("j1", 0.5), ("missing", 1.0)]);
        assert!(result.is_err());
        assert_eq!(model.joint_position("j1").unwrap(), 0.0);

        model.set_joint_positions([("j1", 0.5), ("j2", -0.25)]).unwrap();
        assert_eq!(model.joint_position("j1").unwrap(), 0.5);
        assert_eq!(model.joint_position("j2").unwrap(), -0.25);

        model.reset_to_defaults();
        assert_eq!(model.joint_position("j1").unwrap(), 0.0);
        assert_eq!(model.joint_position("j2").unwrap(), 0.0);
    }

    #[test]
    fn test_default_position_midpoint_when_zero_out_of_range() {
        let desc = ModelDescription::new("offset")
            .with_link("a")
            .with_link("b")
            .with_joint(JointSpec::revolute("j", "a", "b").with_limits(0.5, 1.5));
        let model = KinematicModel::from_description(&desc).unwrap();
        assert_eq!(model.joint_position("j").unwrap(), 1.0);
    }

    #[test]
    fn test_explicit_default_position() {
        let desc = ModelDescription::new("preset")
            .with_link("a")
            .with_link("b")
            .with_joint(JointSpec::revolute("j", "a", "b").with_position(0.2));
        let mut model = KinematicModel::from_description(&desc).unwrap();
        assert_eq!(model.joint_position("j").unwrap(), 0.2);
        model.set_joint_position("j", 1.0).unwrap();
        model.reset_to_defaults();
        assert_eq!(model.joint_position("j").unwrap(), 0.2);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            KinematicModel::from_description(&ModelDescription::new("empty")),
            Err(ModelError::EmptyModel)
        ));

        let dup = ModelDescription::new("dup").with_link("a").with_link("a");
        assert!(matches!(
            KinematicModel::from_description(&dup),
            Err(ModelError::DuplicateLink(name)) if name == "a"
        ));

        let unknown = ModelDescription::new("unknown")
            .with_link("a")
            .with_joint(JointSpec::fixed("j", "a", "ghost"));
        assert!(matches!(
            KinematicModel::from_description(&unknown),
            Err(ModelError::UnknownLink(name)) if name == "ghost"
        ));

        let two_roots = ModelDescription::new("forest").with_link("a").with_link("b");
        assert!(matches!(
            KinematicModel::from_description(&two_roots),
            Err(ModelError::RootCount { count: 2, .. })
        ));

        let two_parents = ModelDescription::new("diamond")
            .with_link("a")
            .with_link("b")
            .with_link("c")
            .with_joint(JointSpec::fixed("j1", "a", "c"))
            .with_joint(JointSpec::fixed("j2", "b", "c"));
        assert!(matches!(
            KinematicModel::from_description(&two_parents),
            Err(ModelError::MultipleParents { .. })
        ));

        let dup_joint = ModelDescription::new("dup_joint")
            .with_link("a")
            .with_link("b")
            .with_link("c")
            .with_joint(JointSpec::fixed("j", "a", "b"))
            .with_joint(JointSpec::fixed("j", "b", "c"));
        assert!(matches!(
            KinematicModel::from_description(&dup_joint),
            Err(ModelError::DuplicateJoint(_))
        ));
    }

    #[test]
    fn test_cycle_detected() {
        // root 与一个二元环：b -> c -> b
        let desc = ModelDescription::new("cycle")
            .with_link("root")
            .with_link("b")
            .with_link("c")
            .with_joint(JointSpec::fixed("j1", "b", "c"))
            .with_joint(JointSpec::fixed("j2", "c", "b"));
        assert!(matches!(
            KinematicModel::from_description(&desc),
            Err(ModelError::Unreachable(name)) if name == "b"
        ));
    }

    #[test]
    fn test_invalid_joint_definitions() {
        let zero_axis = ModelDescription::new("zero_axis")
            .with_link("a")
            .with_link("b")
            .with_joint(JointSpec::revolute("j", "a", "b").with_axis([0.0, 0.0, 0.0]));
        assert!(matches!(
            KinematicModel::from_description(&zero_axis),
            Err(ModelError::InvalidJoint { .. })
        ));

        let inverted = ModelDescription::new("inverted")
            .with_link("a")
            .with_link("b")
            .with_joint(JointSpec::revolute("j", "a", "b").with_limits(1.0, -1.0));
        assert!(matches!(
            KinematicModel::from_description(&inverted),
            Err(ModelError::InvalidJoint { .. })
        ));

        let self_loop = ModelDescription::new("self")
            .with_link("a")
            .with_joint(JointSpec::fixed("j", "a", "a"));
        assert!(matches!(
            KinematicModel::from_description(&self_loop),
            Err(ModelError::InvalidJoint { .. })
        ));

        let outside = ModelDescription::new("outside")
            .with_link("a")
            .with_link("b")
            .with_joint(JointSpec::revolute("j", "a", "b").with_limits(-1.0, 1.0).with_position(2.0));
        assert!(matches!(
            KinematicModel::from_description(&outside),
            Err(ModelError::InvalidJoint { .. })
        ));

        // 固定关节的零轴不影响构建
        let fixed_zero_axis = ModelDescription::new("fixed")
            .with_link("a")
            .with_link("b")
            .with_joint(JointSpec::fixed("j", "a", "b").with_axis([0.0, 0.0, 0.0]));
        assert!(KinematicModel::from_description(&fixed_zero_axis).is_ok());
    }

    #[test]
    fn test_unknown_link_transform() {
        let model = KinematicModel::from_description(&two_link()).unwrap();
        assert!(!model.has_link("tool"));
        assert!(matches!(
            model.global_link_transform("tool"),
            Err(ModelError::UnknownLink(_))
        ));
    }

    #[test]
    fn test_provider_homogeneous_transform() {
        let model = KinematicModel::from_description(&two_link()).unwrap();
        let m = model.global_link_transform("arm").unwrap();
        assert_eq!(m[(0, 3)], 1.0);
        assert_eq!(m[(3, 3)], 1.0);
        assert_eq!(m.fixed_view::<3, 3>(0, 0), nalgebra::Matrix3::identity());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// 截断后的值总在限位内，且等于读回的值
            #[test]
            fn clamped_position_within_limits(value in -10.0..10.0f64) {
                let mut model = KinematicModel::from_description(&two_link()).unwrap();
                let applied = model.set_joint_position("shoulder", value).unwrap();
                prop_assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&applied));
                prop_assert_eq!(model.joint_position("shoulder").unwrap(), applied);
            }

            /// 任意关节位置下，全局变换的旋转部分保持正交
            #[test]
            fn global_rotation_is_orthonormal(j1 in -6.3..6.3f64, j2 in -6.3..6.3f64) {
                let mut model = KinematicModel::from_description(&branching()).unwrap();
                model.set_joint_positions([("j1", j1), ("j2", j2)]).unwrap();

                for link in model.links() {
                    let m = model.global_link_transform(link).unwrap();
                    let r = m.fixed_view::<3, 3>(0, 0).into_owned();
                    let err = (r.transpose() * r - nalgebra::Matrix3::identity()).norm();
                    prop_assert!(err < 1e-9, "link {} orthonormality error {}", link, err);
                    prop_assert!((r.determinant() - 1.0).abs() < 1e-9);
                }
            }
        }
    }
}
