//! CLI 配置
//!
//! 配置文件位于 `<config_dir>/robot-state/config.toml`（可用 `--config` 覆盖）：
//!
//! ```toml
//! model = "/opt/robot/arm.toml"
//! node_name = "pose_bridge"
//!
//! [runtime]
//! anonymous = false
//! spinner_threads = 1
//! ```

use anyhow::{Context, Result};
use robot_state::RuntimeConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 默认配置文件路径
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("robot-state");
        path.push("config.toml");
        path
    })
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// 默认模型描述文件
    pub model: Option<PathBuf>,

    /// 默认节点名称
    pub node_name: Option<String>,

    /// 运行时配置
    pub runtime: Option<RuntimeConfig>,
}

impl CliConfig {
    /// 加载配置
    ///
    /// 显式指定的文件必须存在；默认位置的文件不存在时返回默认配置。
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_file() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        tracing::debug!("Loaded CLI configuration from {}", path.display());
        Ok(config)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if let Some(runtime) = &config.runtime {
            runtime.validate()?;
        }
        Ok(config)
    }

    /// 模型文件：命令行参数优先
    pub fn model_path(&self, arg: Option<&Path>) -> Result<PathBuf> {
        arg.map(Path::to_path_buf)
            .or_else(|| self.model.clone())
            .context("未指定模型文件（使用 --model 或在配置文件中设置 model）")
    }
}
