//! 快照数据结构
//!
//! 线上格式固定为：
//!
//! ```text
//! { "global_link": [ [name, tx, ty, tz, qx, qy, qz, qw], ... ] }
//! ```
//!
//! 四元数按 x, y, z, w 顺序输出（与 nalgebra 内部存储顺序一致，与构造函数
//! `Quaternion::new(w, i, j, k)` 的参数顺序不同）。

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 快照中唯一的参考系名称
pub const GLOBAL_FRAME: &str = "global_link";

/// 单条 link 记录的线上形式：`[name, tx, ty, tz, qx, qy, qz, qw]`
pub type LinkRecord = (String, f64, f64, f64, f64, f64, f64, f64);

/// 单个 link 的全局位姿
///
/// 平移单位沿用模型的长度单位。四元数保持 `from_rotation_matrix` 的原始符号，
/// 不做规范化（`q` 与 `-q` 表示同一旋转）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LinkRecord", into = "LinkRecord")]
pub struct LinkTransform {
    name: String,
    translation: Vector3<f64>,
    rotation: UnitQuaternion<f64>,
}

impl LinkTransform {
    pub fn new(
        name: impl Into<String>,
        translation: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            translation,
            rotation,
        }
    }

    /// link 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn translation(&self) -> &Vector3<f64> {
        &self.translation
    }

    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    /// 四元数分量，顺序为 `[x, y, z, w]`
    pub fn quaternion_xyzw(&self) -> [f64; 4] {
        let q = self.rotation.quaternion();
        [q.i, q.j, q.k, q.w]
    }

    /// 转换为线上记录
    pub fn to_record(&self) -> LinkRecord {
        let [qx, qy, qz, qw] = self.quaternion_xyzw();
        (
            self.name.clone(),
            self.translation.x,
            self.translation.y,
            self.translation.z,
            qx,
            qy,
            qz,
            qw,
        )
    }
}

impl From<LinkRecord> for LinkTransform {
    fn from((name, tx, ty, tz, qx, qy, qz, qw): LinkRecord) -> Self {
        // 记录来自模型，直接沿用，不重新归一化
        Self {
            name,
            translation: Vector3::new(tx, ty, tz),
            rotation: UnitQuaternion::new_unchecked(Quaternion::new(qw, qx, qy, qz)),
        }
    }
}

impl From<LinkTransform> for LinkRecord {
    fn from(transform: LinkTransform) -> Self {
        transform.to_record()
    }
}

/// 同一参考系下的 link 位姿序列（顺序即模型的原生枚举顺序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameGroup(Vec<LinkTransform>);

impl FrameGroup {
    pub fn new(links: Vec<LinkTransform>) -> Self {
        Self(links)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn links(&self) -> &[LinkTransform] {
        &self.0
    }

    /// 按名称查找（线性查找）
    pub fn get(&self, name: &str) -> Option<&LinkTransform> {
        self.0.iter().find(|link| link.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LinkTransform> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<LinkTransform> {
        self.0
    }
}

impl<'a> IntoIterator for &'a FrameGroup {
    type Item = &'a LinkTransform;
    type IntoIter = std::slice::Iter<'a, LinkTransform>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// 位姿快照：参考系名称 → link 位姿序列
///
/// 由 [`capture_link_poses`](crate::capture_link_poses) 生成时恰好包含一个
/// `global_link` 条目。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(BTreeMap<String, FrameGroup>);

impl Snapshot {
    /// 以 `global_link` 为唯一参考系构造快照
    pub fn global(links: Vec<LinkTransform>) -> Self {
        let mut frames = BTreeMap::new();
        frames.insert(GLOBAL_FRAME.to_string(), FrameGroup::new(links));
        Self(frames)
    }

    /// 查询参考系
    pub fn frame(&self, name: &str) -> Option<&FrameGroup> {
        self.0.get(name)
    }

    /// `global_link` 下的所有记录（不存在时为空切片）
    pub fn global_links(&self) -> &[LinkTransform] {
        self.frame(GLOBAL_FRAME)
            .map(FrameGroup::links)
            .unwrap_or(&[])
    }

    /// 参考系数量
    pub fn frame_count(&self) -> usize {
        self.0.len()
    }

    pub fn frames(&self) -> impl Iterator<Item = (&str, &FrameGroup)> {
        self.0.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// 序列化为紧凑 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 序列化为缩进 JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn into_inner(self) -> BTreeMap<String, FrameGroup> {
        self.0
    }
}
