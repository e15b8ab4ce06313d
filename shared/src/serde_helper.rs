//! serde 辅助函数
//!
//! 后端 (MongoEngine) 对未设置的可选字段会返回 `null`，
//! 这里把 `null` 统一折叠为类型的默认值。

use serde::{Deserialize, Deserializer};

/// 将 JSON `null` 反序列化为 `T::default()`
///
/// 配合 `#[serde(default, deserialize_with = "null_as_default")]` 使用，
/// 同时覆盖“字段缺失”和“字段为 null”两种情况。
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
