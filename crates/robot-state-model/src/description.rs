//! # 模型描述
//!
//! 运动学模型的声明式描述（link + joint），可从 TOML 加载，也可在代码中链式构造。
//!
//! ```toml
//! name = "two_link"
//!
//! [[links]]
//! name = "base"
//!
//! [[links]]
//! name = "arm"
//!
//! [[joints]]
//! name = "shoulder"
//! type = "revolute"
//! parent = "base"
//! child = "arm"
//! origin = { xyz = [1.0, 0.0, 0.0], rpy = [0.0, 0.0, 0.0] }
//! axis = [0.0, 0.0, 1.0]
//! limits = { lower = -3.14, upper = 3.14 }
//! ```

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 模型描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    /// 模型名称
    pub name: String,

    /// 所有 link（声明顺序即子节点遍历顺序的参考）
    #[serde(default)]
    pub links: Vec<LinkSpec>,

    /// 所有 joint
    #[serde(default)]
    pub joints: Vec<JointSpec>,
}

impl ModelDescription {
    /// 创建空描述
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
            joints: Vec::new(),
        }
    }

    /// 添加 link
    pub fn with_link(mut self, name: impl Into<String>) -> Self {
        self.links.push(LinkSpec { name: name.into() });
        self
    }

    /// 添加 joint
    pub fn with_joint(mut self, joint: JointSpec) -> Self {
        self.joints.push(joint);
        self
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, ModelError> {
        Ok(toml::from_str(content)?)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// link 描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    /// link 名称（模型内唯一）
    pub name: String,
}

/// 关节类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointKind {
    /// 固定关节（无自由度）
    Fixed,
    /// 有限位的旋转关节
    Revolute,
    /// 无限位的旋转关节
    Continuous,
    /// 平移关节
    Prismatic,
}

impl JointKind {
    /// 是否有位置变量
    pub fn is_actuated(self) -> bool {
        !matches!(self, JointKind::Fixed)
    }
}

/// 关节原点（相对父 link 坐标系）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Origin {
    /// 平移（模型长度单位）
    #[serde(default)]
    pub xyz: [f64; 3],

    /// 固定轴 roll-pitch-yaw（rad）
    #[serde(default)]
    pub rpy: [f64; 3],
}

/// 关节限位
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointLimits {
    /// 下限（rad 或长度单位）
    pub lower: f64,
    /// 上限（rad 或长度单位）
    pub upper: f64,
}

fn default_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

/// joint 描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointSpec {
    /// joint 名称（模型内唯一）
    pub name: String,

    /// 关节类型
    #[serde(rename = "type")]
    pub kind: JointKind,

    /// 父 link
    pub parent: String,

    /// 子 link
    pub child: String,

    /// 原点
    #[serde(default)]
    pub origin: Origin,

    /// 运动轴（joint 坐标系内，不要求单位长度）
    #[serde(default = "default_axis")]
    pub axis: [f64; 3],

    /// 限位（仅 revolute / prismatic 生效）
    #[serde(default)]
    pub limits: Option<JointLimits>,

    /// 初始位置（缺省为 0；0 不在限位内时取限位中点）
    #[serde(default)]
    pub position: Option<f64>,
}

impl JointSpec {
    fn new(
        name: impl Into<String>,
        kind: JointKind,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            parent: parent.into(),
            child: child.into(),
            origin: Origin::default(),
            axis: default_axis(),
            limits: None,
            position: None,
        }
    }

    /// 固定关节
    pub fn fixed(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self::new(name, JointKind::Fixed, parent, child)
    }

    /// 旋转关节
    pub fn revolute(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self::new(name, JointKind::Revolute, parent, child)
    }

    /// 无限位旋转关节
    pub fn continuous(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self::new(name, JointKind::Continuous, parent, child)
    }

    /// 平移关节
    pub fn prismatic(
        name: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self::new(name, JointKind::Prismatic, parent, child)
    }

    /// 设置原点
    pub fn with_origin(mut self, xyz: [f64; 3], rpy: [f64; 3]) -> Self {
        self.origin = Origin { xyz, rpy };
        self
    }

    /// 设置运动轴
    pub fn with_axis(mut self, axis: [f64; 3]) -> Self {
        self.axis = axis;
        self
    }

    /// 设置限位
    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.limits = Some(JointLimits { lower, upper });
        self
    }

    /// 设置初始位置
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }
}
