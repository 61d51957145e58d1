//! # 运行时配置

use crate::error::RuntimeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 未显式调用 `start` 时使用的节点名称
pub const DEFAULT_NODE_NAME: &str = "robot_state_wrappers";

/// 运行时配置
///
/// 只能在运行时停止时替换（见 [`configure`](crate::configure)）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// 默认节点名称
    pub default_node_name: String,

    /// 是否在节点名称后追加 `_<pid>_<微秒时间戳>`
    ///
    /// 同一台机器上可能同时运行多个快照进程，匿名后缀避免节点名冲突。
    pub anonymous: bool,

    /// spinner 线程数（处理投递到运行时的回调）
    pub spinner_threads: usize,

    /// 回调队列容量
    pub queue_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_node_name: DEFAULT_NODE_NAME.to_string(),
            anonymous: true,
            spinner_threads: 1,
            queue_capacity: 64,
        }
    }
}

impl RuntimeConfig {
    /// 从 TOML 字符串解析（缺失字段取默认值）
    pub fn from_toml_str(content: &str) -> Result<Self, RuntimeError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), RuntimeError> {
        if self.spinner_threads == 0 {
            return Err(RuntimeError::Config(
                "spinner_threads must be at least 1".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(RuntimeError::Config(
                "queue_capacity must be at least 1".to_string(),
            ));
        }
        crate::identity::validate_node_name(&self.default_node_name)
    }
}
