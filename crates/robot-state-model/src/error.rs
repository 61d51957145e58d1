//! 模型层错误类型定义

use thiserror::Error;

/// 模型层错误类型
#[derive(Error, Debug)]
pub enum ModelError {
    /// 模型描述为空（没有任何 link）
    #[error("Model description has no links")]
    EmptyModel,

    /// link 名称重复
    #[error("Duplicate link name: {0}")]
    DuplicateLink(String),

    /// joint 名称重复
    #[error("Duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// 未知 link
    #[error("Unknown link: {0}")]
    UnknownLink(String),

    /// 未知 joint
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// 同一个 link 被多个 joint 作为 child
    #[error("Link '{link}' has more than one parent joint ('{first}', '{second}')")]
    MultipleParents {
        link: String,
        first: String,
        second: String,
    },

    /// 根 link 数量不为 1
    #[error("Model must have exactly one root link, found {count}: {links:?}")]
    RootCount { count: usize, links: Vec<String> },

    /// 运动学树中存在环（或从根不可达的 link）
    #[error("Link '{0}' is not reachable from the root (cycle in joint tree)")]
    Unreachable(String),

    /// 无效的 joint 定义（零轴、非有限数值、上下限颠倒等）
    #[error("Invalid joint '{joint}': {reason}")]
    InvalidJoint { joint: String, reason: String },

    /// 固定关节没有可设置的位置
    #[error("Joint '{0}' is fixed and has no position variable")]
    FixedJoint(String),

    /// 非有限的关节位置
    #[error("Non-finite position {value} for joint '{joint}'")]
    NonFinitePosition { joint: String, value: f64 },

    /// 变换计算结果非有限
    #[error("Global transform of link '{0}' is not finite")]
    NonFiniteTransform(String),

    /// 模型句柄无效（未初始化或已失效）
    #[error("Model handle is not valid")]
    InvalidHandle,

    /// 读取模型描述文件失败
    #[error("Failed to read model description: {0}")]
    Io(#[from] std::io::Error),

    /// 解析模型描述失败
    #[error("Failed to parse model description: {0}")]
    Parse(#[from] toml::de::Error),
}
