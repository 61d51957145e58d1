//! # Robot State CLI
//!
//! Command-line interface for robot link pose snapshots.
//!
//! ## One-shot 模式（推荐用于 CI/脚本）
//!
//! ```bash
//! # 校验模型描述，按快照顺序列出 link
//! robot-state-cli check --model arm.toml
//!
//! # 采集一次快照（内部：启动运行时 -> 采集 -> 关闭运行时）
//! robot-state-cli snapshot --model arm.toml --joint joint1=0.5 --pretty
//!
//! # 指定运行时身份
//! robot-state-cli snapshot --model arm.toml --node-name pose_bridge -- __ns:=left_arm
//! ```
//!
//! ## 服务模式（供其他进程调用）
//!
//! ```bash
//! $ robot-state-cli serve --model arm.toml
//! {"op":"capture"}
//! {"global_link":[["base_link",0.0,0.0,0.0,0.0,0.0,0.0,1.0], ...]}
//! {"op":"stop"}
//! {"ok":true}
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

use commands::{CheckCommand, ServeCommand, SnapshotCommand};
use config::CliConfig;

/// Robot State CLI - link 位姿快照命令行工具
#[derive(Parser, Debug)]
#[command(name = "robot-state-cli")]
#[command(about = "Command-line interface for robot link pose snapshots", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件（默认 `<config_dir>/robot-state/config.toml`）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 采集一次 link 位姿快照并输出 JSON
    Snapshot {
        #[command(flatten)]
        args: SnapshotCommand,
    },

    /// 诊断回显
    Echo,

    /// 校验模型描述
    Check {
        #[command(flatten)]
        args: CheckCommand,
    },

    /// JSON lines 服务（stdin → stdout）
    Serve {
        #[command(flatten)]
        args: ServeCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志（输出到 stderr，stdout 只输出结果）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("robot_state=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Echo => commands::echo::execute(),

        Commands::Snapshot { args } => {
            let config = CliConfig::load(cli.config.as_deref())?;
            args.execute(&config)
        },

        Commands::Check { args } => {
            let config = CliConfig::load(cli.config.as_deref())?;
            args.execute(&config)
        },

        Commands::Serve { args } => {
            let config = CliConfig::load(cli.config.as_deref())?;
            args.execute(&config)
        },
    }
}
