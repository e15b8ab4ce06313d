//! 认证模块
//!
//! `SessionContext` 是整个应用共享的会话上下文：挂载时从存储读取一次，
//! 之后通过 Context 注入各组件，不再直接访问存储。
//! 任何调用方收到 401 时统一调用 `invalidate`，界面随认证信号自动回到登录页。

use crate::api::CatalogApi;
use crate::error::ApiResult;
use crate::session::{BrowserSessionStore, SessionStore};
use crate::web::http::HttpClient;
use catalog_shared::{Credentials, Session};
use leptos::logging::{log, warn};
use leptos::prelude::*;

/// 会话上下文
///
/// 包含会话信号与持久化存储，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct SessionContext<S = BrowserSessionStore> {
    session: RwSignal<Option<Session>>,
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    /// 从存储加载会话，创建上下文
    pub fn load(store: S) -> Self {
        let session = RwSignal::new(store.load());
        Self { session, store }
    }

    /// 当前会话（不追踪）
    pub fn current(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    /// 会话信号（只读）
    pub fn session_signal(&self) -> Signal<Option<Session>> {
        self.session.into()
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(Option::is_some))
    }

    /// 登录成功后建立会话
    pub fn establish(&self, session: Session) {
        self.store.save(&session);
        self.session.set(Some(session));
    }

    /// 注销并清除状态
    ///
    /// 导航由路由出口根据认证信号自动处理。
    pub fn clear(&self) {
        self.store.clear();
        self.session.set(None);
    }

    /// 服务器判定会话失效 (401)
    pub fn invalidate(&self, reason: &str) {
        warn!("[Auth] session invalidated: {}", reason);
        self.clear();
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// 登录并保存会话
///
/// 成功时返回建立的会话；失败时会话保持不变。
pub async fn login<C: HttpClient, S: SessionStore>(
    ctx: &SessionContext<S>,
    api: &CatalogApi<C>,
    credentials: Credentials,
) -> ApiResult<Session> {
    let session = api.login(&credentials).await?;
    log!(
        "[Auth] logged in as {} ({})",
        credentials.username,
        session.role.as_str()
    );
    ctx.establish(session.clone());
    Ok(session)
}

/// 注销
pub fn logout<S: SessionStore>(ctx: &SessionContext<S>) {
    ctx.clear();
    log!("[Auth] logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use crate::web::http::MockHttpClient;
    use catalog_shared::Role;
    use catalog_shared::protocol::HttpMethod;
    use serde_json::json;

    fn admin() -> Session {
        Session {
            token: "tok".into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn load_reads_the_store_once() {
        let store = MemorySessionStore::with_session(admin());
        let ctx = SessionContext::load(store.clone());

        assert_eq!(ctx.token().as_deref(), Some("tok"));
        assert!(ctx.current().is_some_and(|s| s.is_admin()));
        assert!(ctx.is_authenticated_signal().get_untracked());

        // 之后对存储的直接修改不会影响上下文
        store.clear();
        assert!(ctx.current().is_some());
    }

    #[test]
    fn invalidate_clears_store_and_signal() {
        let store = MemorySessionStore::with_session(admin());
        let ctx = SessionContext::load(store.clone());

        ctx.invalidate("401 from test");

        assert!(ctx.current().is_none());
        assert!(store.stored().is_none());
        assert!(!ctx.is_authenticated_signal().get_untracked());
        assert!(ctx.token().is_none());
    }

    #[test]
    fn non_admin_role_is_not_admin() {
        let store = MemorySessionStore::with_session(Session {
            token: "t".into(),
            role: Role::Other("consumer".into()),
        });
        let ctx = SessionContext::load(store);
        assert!(ctx.is_authenticated_signal().get_untracked());
        assert!(!ctx.current().is_some_and(|s| s.is_admin()));
    }

    #[tokio::test]
    async fn login_establishes_and_persists_session() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/login",
            200,
            json!({"token": "jwt", "role": "admin"}),
        );
        let api = CatalogApi::new("http://api.test", client.clone());
        let store = MemorySessionStore::default();
        let ctx = SessionContext::load(store.clone());

        let session = login(
            &ctx,
            &api,
            Credentials {
                username: "ada".into(),
                password: "pw".into(),
            },
        )
        .await
        .unwrap();

        assert!(session.is_admin());
        assert_eq!(store.stored(), Some(session.clone()));
        assert_eq!(ctx.current(), Some(session));

        let sent = client.last_request().unwrap();
        assert!(sent.header("Authorization").is_none());
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(sent.body.as_deref().unwrap()).unwrap(),
            json!({"username": "ada", "password": "pw"})
        );
    }

    #[tokio::test]
    async fn failed_login_leaves_session_untouched() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            "http://api.test/api/auth/login",
            401,
            json!({"message": "Login failed."}),
        );
        let api = CatalogApi::new("http://api.test", client);
        let ctx = SessionContext::load(MemorySessionStore::default());

        let err = login(
            &ctx,
            &api,
            Credentials {
                username: "ada".into(),
                password: "bad".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.user_message(), "Login failed.");
        assert!(ctx.current().is_none());
    }

    #[test]
    fn logout_clears_session() {
        let store = MemorySessionStore::with_session(admin());
        let ctx = SessionContext::load(store.clone());
        logout(&ctx);
        assert!(ctx.current().is_none());
        assert!(store.stored().is_none());
    }
}
