//! 诊断回显命令

use anyhow::Result;

/// 输出 `{"hello":"world"}`
pub fn execute() -> Result<()> {
    println!("{}", serde_json::to_string(&robot_state::diagnostic_echo())?);
    Ok(())
}
