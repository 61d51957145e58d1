//! JSON lines 服务命令
//!
//! 从 stdin 逐行读取请求，每个请求在 stdout 上输出一行响应：
//!
//! ```text
//! → {"op":"capture"}
//! ← {"global_link":[["base",0.0,0.0,0.0,0.0,0.0,0.0,1.0], ...]}
//! → {"op":"set_joints","positions":{"joint1":0.5}}
//! ← {"ok":true,"positions":{"joint1":0.5}}
//! → {"op":"echo"}
//! ← {"hello":"world"}
//! → {"op":"stop"}
//! ← {"ok":true}
//! ```
//!
//! 请求失败时返回 `{"error":{"kind":...,"message":...}}`，循环继续。
//! stdin 关闭、收到 `stop` 或 Ctrl-C 时关闭运行时并退出。

use super::{RuntimeArgs, apply_runtime_config, load_model};
use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use parking_lot::RwLock;
use robot_state::{KinematicModel, ModelError, RobotStateWrapper, SharedModel, StateError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// 服务命令参数
#[derive(Args, Debug)]
pub struct ServeCommand {
    /// 模型描述文件（覆盖配置）
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

impl ServeCommand {
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let (path, model) = load_model(config, self.model.as_deref())?;
        apply_runtime_config(config)?;

        let model = Arc::new(RwLock::new(model));
        let wrapper = self
            .runtime
            .wrapper_builder(config)
            .model(model.clone() as SharedModel)
            .build()?;

        ctrlc::set_handler(|| {
            eprintln!("\nReceived interrupt signal. Shutting down...");
            // 等待进行中的快照完成后关闭运行时
            robot_state::stop();
            std::process::exit(0);
        })?;

        tracing::info!("Serving snapshots of {} on stdin/stdout", path.display());
        let session = Session::new(wrapper, model);
        let stdin = io::stdin();
        let stdout = io::stdout();
        let handled = session.run(stdin.lock(), stdout.lock())?;
        tracing::info!("Session finished after {} request(s)", handled);

        drop(session);
        robot_state::stop();
        Ok(())
    }
}

/// 请求
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Request {
    Capture,
    Echo,
    SetJoints { positions: BTreeMap<String, f64> },
    Reset,
    Stop,
}

/// 单个请求的处理结果
#[derive(Debug)]
enum Reply {
    Continue(Value),
    Stop(Value),
}

/// 服务会话：一个快照对象 + 可修改的模型
pub struct Session {
    wrapper: RobotStateWrapper,
    model: Arc<RwLock<KinematicModel>>,
}

impl Session {
    pub fn new(wrapper: RobotStateWrapper, model: Arc<RwLock<KinematicModel>>) -> Self {
        Self { wrapper, model }
    }

    /// 处理请求直到输入结束或收到 `stop`，返回处理的请求数
    pub fn run<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<usize> {
        let mut handled = 0;
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            handled += 1;

            let (response, stop) = match self.handle_line(&line) {
                Reply::Continue(value) => (value, false),
                Reply::Stop(value) => (value, true),
            };
            writeln!(writer, "{}", response)?;
            writer.flush()?;

            if stop {
                break;
            }
        }
        Ok(handled)
    }

    fn handle_line(&self, line: &str) -> Reply {
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => return Reply::Continue(error_value("bad_request", &e)),
        };
        tracing::debug!("Request: {:?}", request);

        match request {
            Request::Capture => Reply::Continue(self.capture()),
            Request::Echo => Reply::Continue(json!(self.wrapper.diagnostic_echo())),
            Request::SetJoints { positions } => Reply::Continue(self.set_joints(&positions)),
            Request::Reset => {
                self.model.write().reset_to_defaults();
                Reply::Continue(json!({ "ok": true }))
            },
            Request::Stop => Reply::Stop(json!({ "ok": true })),
        }
    }

    fn capture(&self) -> Value {
        let snapshot = match self.wrapper.capture_link_poses() {
            Ok(snapshot) => snapshot,
            Err(e) => return state_error_value(&e),
        };
        match snapshot.to_value() {
            Ok(value) => value,
            Err(e) => error_value("serialization", &e),
        }
    }

    fn set_joints(&self, positions: &BTreeMap<String, f64>) -> Value {
        let mut model = self.model.write();
        if let Err(e) = model.set_joint_positions(positions.iter().map(|(k, v)| (k, *v))) {
            return model_error_value(&e);
        }

        // 返回实际生效的值（可能被限位截断）
        let applied: BTreeMap<&str, f64> = positions
            .keys()
            .filter_map(|name| model.joint_position(name).ok().map(|v| (name.as_str(), v)))
            .collect();
        json!({ "ok": true, "positions": applied })
    }
}

fn error_value(kind: &str, message: &dyn std::fmt::Display) -> Value {
    json!({ "error": { "kind": kind, "message": message.to_string() } })
}

fn state_error_value(e: &StateError) -> Value {
    error_value(e.kind(), e)
}

fn model_error_value(e: &ModelError) -> Value {
    error_value("model", e)
}
