//! 快照层错误类型定义

use robot_state_model::ModelError;
use robot_state_runtime::RuntimeError;
use thiserror::Error;

/// 快照层错误类型
///
/// 所有错误同步返回；内部不做重试，失败的快照不返回任何部分数据。
#[derive(Error, Debug)]
pub enum StateError {
    /// 运行时启动失败（调用方可重试）
    #[error("Runtime initialization failed: {0}")]
    RuntimeInit(#[from] RuntimeError),

    /// 没有可用的模型（未绑定或句柄无效）
    #[error("Kinematic model unavailable")]
    ModelUnavailable,

    /// 某个 link 的全局变换查询失败，整个快照中止
    #[error("Failed to compute global transform of link '{link}': {source}")]
    LinkTransform {
        link: String,
        #[source]
        source: ModelError,
    },
}

impl StateError {
    /// 稳定的错误类别标识（用于跨进程的错误报告）
    pub fn kind(&self) -> &'static str {
        match self {
            StateError::RuntimeInit(_) => "runtime_init",
            StateError::ModelUnavailable => "model_unavailable",
            StateError::LinkTransform { .. } => "link_transform",
        }
    }
}
