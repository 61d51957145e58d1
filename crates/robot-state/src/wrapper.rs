//! 快照对象
//!
//! [`RobotStateWrapper`] 把一个模型句柄和一个运行时租约绑定在一起：
//!
//! - 构造时**先**获取运行时租约，成功后才接触模型
//! - 快照期间持有 [`ActiveScope`](robot_state_runtime::ActiveScope)，
//!   显式的 [`stop`](crate::stop) 会等待进行中的快照完成
//! - 析构时释放租约，但不关闭运行时

use crate::capture::capture_link_poses;
use crate::echo::diagnostic_echo;
use crate::error::StateError;
use crate::snapshot::Snapshot;
use robot_state_model::ModelProvider;
use robot_state_runtime::{NodeIdentity, RuntimeGuard};
use std::collections::BTreeMap;
use std::sync::Arc;

/// 共享的模型句柄
pub type SharedModel = Arc<dyn ModelProvider>;

/// 位姿快照对象
///
/// # Example
///
/// ```no_run
/// use robot_state::{KinematicModel, ModelDescription, RobotStateWrapper};
/// use std::sync::Arc;
///
/// let desc = ModelDescription::load_from_file("arm.toml")?;
/// let model = Arc::new(KinematicModel::from_description(&desc)?);
///
/// let wrapper = RobotStateWrapper::builder().model(model).build()?;
/// println!("{}", wrapper.capture_link_poses()?.to_json()?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RobotStateWrapper {
    // 字段按声明顺序析构：模型句柄先于租约释放
    model: Option<SharedModel>,
    guard: RuntimeGuard,
}

impl RobotStateWrapper {
    /// 以默认运行时身份创建（不绑定模型）
    ///
    /// # Errors
    /// - `StateError::RuntimeInit`: 运行时启动失败
    pub fn new() -> Result<Self, StateError> {
        Self::builder().build()
    }

    /// 以默认运行时身份创建并绑定模型
    pub fn with_model(model: SharedModel) -> Result<Self, StateError> {
        Self::builder().model(model).build()
    }

    /// 创建 Builder
    pub fn builder() -> RobotStateWrapperBuilder {
        RobotStateWrapperBuilder::new()
    }

    /// 绑定模型（替换已有模型）
    pub fn attach_model(&mut self, model: SharedModel) {
        self.model = Some(model);
    }

    /// 解除模型绑定
    pub fn detach_model(&mut self) -> Option<SharedModel> {
        self.model.take()
    }

    /// 是否已绑定模型
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// 当前模型句柄
    pub fn model(&self) -> Option<&SharedModel> {
        self.model.as_ref()
    }

    /// 采集所有 link 的全局位姿
    ///
    /// # Errors
    /// - `StateError::ModelUnavailable`: 未绑定模型或模型句柄无效
    /// - `StateError::LinkTransform`: 某个 link 的变换查询失败
    pub fn capture_link_poses(&self) -> Result<Snapshot, StateError> {
        let _scope = self.guard.scope();
        let model = self.model.as_ref().ok_or(StateError::ModelUnavailable)?;
        capture_link_poses(model.as_ref())
    }

    /// 诊断回显：始终返回 `{"hello": "world"}`
    pub fn diagnostic_echo(&self) -> BTreeMap<String, String> {
        diagnostic_echo()
    }

    /// 运行时当前的节点身份（运行时已被显式关闭时为 None）
    pub fn runtime_identity(&self) -> Option<NodeIdentity> {
        robot_state_runtime::current_identity()
    }
}

impl std::fmt::Debug for RobotStateWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobotStateWrapper")
            .field("has_model", &self.has_model())
            .field("guard", &self.guard)
            .finish()
    }
}

/// RobotStateWrapper Builder（链式构造）
///
/// 运行时未启动时，`node_name` / `args` 决定启动身份；运行时已在运行时二者被忽略。
#[derive(Default)]
pub struct RobotStateWrapperBuilder {
    /// 节点名称（未设置时使用最近一次启动的名称或默认名称）
    node_name: Option<String>,
    /// 启动参数（重映射等）
    args: Vec<String>,
    model: Option<SharedModel>,
}

impl RobotStateWrapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置节点名称
    pub fn node_name(mut self, name: impl Into<String>) -> Self {
        self.node_name = Some(name.into());
        self
    }

    /// 追加启动参数
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// 绑定模型
    pub fn model(mut self, model: SharedModel) -> Self {
        self.model = Some(model);
        self
    }

    /// 构建快照对象
    ///
    /// 先获取运行时租约，成功后才绑定模型。
    ///
    /// # Errors
    /// - `StateError::RuntimeInit`: 运行时启动失败（不会留下任何状态）
    pub fn build(self) -> Result<RobotStateWrapper, StateError> {
        let guard = match self.node_name {
            Some(name) => RuntimeGuard::acquire_with(&name, &self.args)?,
            None if self.args.is_empty() => RuntimeGuard::acquire()?,
            None => {
                let name = robot_state_runtime::config().default_node_name;
                RuntimeGuard::acquire_with(&name, &self.args)?
            },
        };

        Ok(RobotStateWrapper {
            model: self.model,
            guard,
        })
    }
}
