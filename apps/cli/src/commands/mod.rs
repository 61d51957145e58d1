//! 命令定义和实现

pub mod check;
pub mod echo;
pub mod serve;
pub mod snapshot;

pub use check::CheckCommand;
pub use serve::ServeCommand;
pub use snapshot::SnapshotCommand;

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use robot_state::{KinematicModel, ModelDescription, RobotStateWrapperBuilder};
use std::path::{Path, PathBuf};

/// 运行时身份参数
#[derive(Args, Debug, Default, Clone)]
pub struct RuntimeArgs {
    /// 节点名称（覆盖配置）
    #[arg(long)]
    pub node_name: Option<String>,

    /// 传给运行时的参数（`--` 之后，如 `__ns:=arm topic:=/other`）
    #[arg(last = true)]
    pub runtime_args: Vec<String>,
}

impl RuntimeArgs {
    /// 生成快照对象的 Builder（命令行参数优先于配置文件）
    pub fn wrapper_builder(&self, config: &CliConfig) -> RobotStateWrapperBuilder {
        let mut builder = robot_state::RobotStateWrapper::builder().args(self.runtime_args.clone());
        if let Some(name) = self.node_name.as_ref().or(config.node_name.as_ref()) {
            builder = builder.node_name(name.clone());
        }
        builder
    }
}

/// 应用配置文件中的运行时配置
pub fn apply_runtime_config(config: &CliConfig) -> Result<()> {
    if let Some(runtime) = &config.runtime {
        robot_state::runtime::configure(runtime.clone()).context("应用运行时配置失败")?;
    }
    Ok(())
}

/// 加载并构建模型
pub fn load_model(config: &CliConfig, arg: Option<&Path>) -> Result<(PathBuf, KinematicModel)> {
    let path = config.model_path(arg)?;
    let desc = ModelDescription::load_from_file(&path)
        .with_context(|| format!("加载模型描述失败: {}", path.display()))?;
    let model = KinematicModel::from_description(&desc)
        .with_context(|| format!("模型描述不合法: {}", path.display()))?;
    tracing::debug!(
        "Loaded model '{}' with {} link(s) from {}",
        model.name(),
        model.link_count(),
        path.display()
    );
    Ok((path, model))
}

/// 解析 `NAME=VALUE` 形式的关节位置
pub fn parse_joint_assignment(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing joint name in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid joint value in '{}': {}", s, e))?;
    Ok((name.to_string(), value))
}
