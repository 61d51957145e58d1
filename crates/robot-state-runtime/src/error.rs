//! 运行时层错误类型定义

use thiserror::Error;

/// 运行时层错误类型
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// 节点名称不合法
    #[error("Invalid node name '{name}': {reason}")]
    InvalidNodeName { name: String, reason: String },

    /// 命名空间不合法
    #[error("Invalid namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    /// 重映射参数格式错误（如 `:=foo`）
    #[error("Invalid remapping argument: {0}")]
    InvalidRemapping(String),

    /// 配置错误
    #[error("Invalid runtime configuration: {0}")]
    Config(String),

    /// 启动 spinner 线程失败
    #[error("Failed to spawn spinner thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// Runtime Host 自身的启动失败
    #[error("Runtime host failed to start: {0}")]
    Host(String),

    /// 运行时正在运行，无法执行该操作（替换 host / 配置）
    #[error("Runtime is already running")]
    AlreadyRunning,

    /// 运行时未启动
    #[error("Runtime is not running")]
    NotRunning,

    /// 回调队列已满
    #[error("Callback queue full (capacity: {0})")]
    QueueFull(usize),

    /// 回调队列已关闭（运行时正在关闭）
    #[error("Callback queue closed")]
    QueueClosed,

    /// 读取配置文件失败
    #[error("Failed to read runtime configuration: {0}")]
    Io(#[from] std::io::Error),

    /// 解析配置文件失败
    #[error("Failed to parse runtime configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
