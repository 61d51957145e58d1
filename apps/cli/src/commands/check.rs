//! 模型检查命令

use super::load_model;
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use robot_state::ModelProvider;
use std::path::PathBuf;

/// 模型检查命令参数
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// 模型描述文件（覆盖配置）
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

impl CheckCommand {
    /// 校验模型描述，按快照顺序列出 link
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let (path, model) = load_model(config, self.model.as_deref())?;

        println!("✅ {} ({})", model.name(), path.display());
        println!("  root: {}", model.root_link());
        println!(
            "  links: {}, joints: {} ({} movable)",
            model.link_count(),
            model.joint_names().len(),
            model.variable_names().len()
        );
        for (i, link) in model.link_names().iter().enumerate() {
            println!("  {:>3}  {}", i, link);
        }
        Ok(())
    }
}
