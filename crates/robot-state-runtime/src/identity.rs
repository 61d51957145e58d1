//! 节点身份解析
//!
//! 启动参数沿用 ROS 风格的重映射语法：
//!
//! - `__name:=<name>`：覆盖节点名称
//! - `__ns:=<namespace>`：设置命名空间
//! - `<from>:=<to>`：普通重映射，原样记录
//! - 其他参数：按原顺序保留为剩余参数

use crate::error::RuntimeError;
use std::time::{SystemTime, UNIX_EPOCH};

const NAME_REMAP: &str = "__name";
const NAMESPACE_REMAP: &str = "__ns";

/// 已解析的节点身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    base_name: String,
    name: String,
    namespace: String,
    remappings: Vec<(String, String)>,
    args: Vec<String>,
}

impl NodeIdentity {
    /// 由进程名称和启动参数解析节点身份
    ///
    /// # Errors
    /// - `RuntimeError::InvalidRemapping`: `:=` 任意一侧为空
    /// - `RuntimeError::InvalidNodeName` / `InvalidNamespace`: 名称不合法
    pub fn resolve(
        process_name: &str,
        args: &[String],
        anonymous: bool,
    ) -> Result<Self, RuntimeError> {
        let mut base_name = process_name.to_string();
        let mut namespace = "/".to_string();
        let mut remappings = Vec::new();
        let mut residual = Vec::new();

        for arg in args {
            match arg.split_once(":=") {
                Some((from, to)) => {
                    if from.is_empty() || to.is_empty() {
                        return Err(RuntimeError::InvalidRemapping(arg.clone()));
                    }
                    match from {
                        NAME_REMAP => base_name = to.to_string(),
                        NAMESPACE_REMAP => namespace = normalize_namespace(to)?,
                        _ => remappings.push((from.to_string(), to.to_string())),
                    }
                },
                None => residual.push(arg.clone()),
            }
        }

        validate_node_name(&base_name)?;

        let name = if anonymous {
            format!("{}_{}", base_name, anonymous_suffix())
        } else {
            base_name.clone()
        };

        Ok(Self {
            base_name,
            name,
            namespace,
            remappings,
            args: residual,
        })
    }

    /// 节点名称（含匿名后缀）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 未加匿名后缀的节点名称
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// 命名空间（以 `/` 开头）
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 全限定名称，如 `/arm/robot_state_wrappers`
    pub fn fully_qualified_name(&self) -> String {
        if self.namespace == "/" {
            format!("/{}", self.name)
        } else {
            format!("{}/{}", self.namespace, self.name)
        }
    }

    /// 普通重映射（不含 `__name` / `__ns`）
    pub fn remappings(&self) -> &[(String, String)] {
        &self.remappings
    }

    /// 剩余参数
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// 校验节点名称：首字符为 ASCII 字母，其余为 ASCII 字母、数字或下划线
pub(crate) fn validate_node_name(name: &str) -> Result<(), RuntimeError> {
    let invalid = |reason: &str| RuntimeError::InvalidNodeName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = name.chars();
    match chars.next() {
        None => return Err(invalid("name is empty")),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(invalid("name must start with an ASCII letter"));
        },
        Some(_) => {},
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Err(invalid(
            "name may only contain ASCII letters, digits and '_'",
        ));
    }
    Ok(())
}

/// 规范化命名空间：补全前导 `/`，去掉末尾 `/`，逐段校验
fn normalize_namespace(namespace: &str) -> Result<String, RuntimeError> {
    let trimmed = namespace.trim_matches('/');
    if trimmed.is_empty() {
        return Ok("/".to_string());
    }
    for segment in trimmed.split('/') {
        validate_node_name(segment).map_err(|e| RuntimeError::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: e.to_string(),
        })?;
    }
    Ok(format!("/{}", trimmed))
}

fn anonymous_suffix() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default();
    format!("{}_{}", std::process::id(), micros)
}
