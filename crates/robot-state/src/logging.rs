//! 日志初始化
//!
//! 库内部统一使用 `tracing` 宏。`log` crate 的记录通过 `tracing-log` 桥接进来，
//! 过滤规则来自 `RUST_LOG`，未设置时为 `robot_state=info`。

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// 未设置 `RUST_LOG` 时的默认过滤规则
pub const DEFAULT_FILTER: &str = "robot_state=info";

static INIT: Once = Once::new();

/// 初始化全局日志（可重复调用，仅第一次生效）
///
/// 宿主程序已安装自己的 subscriber / logger 时，本函数不会覆盖。
pub fn init() {
    INIT.call_once(|| {
        let _ = tracing_log::LogTracer::builder()
            .with_max_level(log::LevelFilter::Trace)
            .init();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
        tracing::info!("logging initialized");
        log::info!("log records are bridged");
    }
}
