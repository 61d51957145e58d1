//! 快照命令

use super::{RuntimeArgs, apply_runtime_config, load_model, parse_joint_assignment};
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// 快照命令参数
#[derive(Args, Debug)]
pub struct SnapshotCommand {
    /// 模型描述文件（覆盖配置）
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// 关节位置（可重复，如 `--joint joint1=0.5`）
    #[arg(short, long = "joint", value_name = "NAME=VALUE", value_parser = parse_joint_assignment)]
    pub joints: Vec<(String, f64)>,

    /// 缩进输出
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

impl SnapshotCommand {
    /// 执行快照：加载模型 → 设置关节 → 采集 → 输出 JSON
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let (_, mut model) = load_model(config, self.model.as_deref())?;
        model.set_joint_positions(self.joints.iter().map(|(name, value)| (name, *value)))?;

        apply_runtime_config(config)?;
        let wrapper = self.runtime.wrapper_builder(config).model(Arc::new(model)).build()?;
        let snapshot = wrapper.capture_link_poses()?;

        let output = if self.pretty {
            snapshot.to_json_pretty()?
        } else {
            snapshot.to_json()?
        };
        println!("{}", output);

        drop(wrapper);
        robot_state::stop();
        Ok(())
    }
}
