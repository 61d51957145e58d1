//! 诊断回显

use std::collections::BTreeMap;

/// 诊断回显：始终返回 `{"hello": "world"}`
///
/// 用于确认调用链路（跨进程绑定、序列化）是否通畅，不依赖运行时和模型。
pub fn diagnostic_echo() -> BTreeMap<String, String> {
    BTreeMap::from([("hello".to_string(), "world".to_string())])
}
