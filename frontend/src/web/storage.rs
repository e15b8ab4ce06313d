//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，值以 JSON 文本保存。

use serde::{Serialize, de::DeserializeOwned};

/// 读取存储值时的错误
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("stored value under `{key}` is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("localStorage rejected write to `{0}`")]
    WriteRejected(String),
}

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }

    /// 读取并反序列化 JSON 值
    ///
    /// 键不存在时返回 `Ok(None)`。
    pub fn get_json<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = Self::storage()?.get_item(key).ok().flatten() else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    /// 序列化为 JSON 并写入
    pub fn set_json<T: Serialize>(key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        Self::storage()?
            .set_item(key, &raw)
            .map_err(|_| StorageError::WriteRejected(key.to_string()))
    }

    /// 删除存储的键值对
    ///
    /// 返回操作是否成功。
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .ok()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
