//! 会话存储
//!
//! 以单个 JSON 对象 `{token, role}` 持久化在 localStorage 的 `auth` 键下，
//! 页面刷新后仍然有效。本地不做过期检查，过期只能由 401 响应被动发现。

use crate::web::LocalStorage;
use catalog_shared::{STORAGE_KEY_SESSION, Session};
use leptos::logging::{error, warn};

/// 会话存储接口
pub trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// 浏览器 localStorage 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<Session> {
        match LocalStorage::get_json::<Session>(STORAGE_KEY_SESSION) {
            Ok(session) => session,
            Err(e) => {
                // 损坏的会话槽位按“未登录”处理，并清掉旧值
                warn!("[Session] discarding stored session: {}", e);
                self.clear();
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        if let Err(e) = LocalStorage::set_json(STORAGE_KEY_SESSION, session) {
            error!("[Session] failed to persist session: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(STORAGE_KEY_SESSION);
    }
}

#[cfg(test)]
pub use memory::MemorySessionStore;
