//! 商品目录前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth` / `session`: 会话上下文与持久化
//! - `api`: 类型化的 REST 客户端
//! - `catalog`: 商品列表控制器（搜索、分页、行内编辑）
//! - `components`: UI 组件层

mod api;
mod auth;
mod catalog;
mod components {
    mod icons;
    pub mod login;
    pub mod navbar;
    pub mod product_table;
    pub mod profile_detail;
    pub mod register;
}
mod config;
mod error;
mod profile;
mod session;

use crate::api::CatalogApi;
use crate::auth::SessionContext;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::product_table::ProductListPage;
use crate::components::profile_detail::ProfilePage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::session::BrowserSessionStore;

use leptos::logging::log;
use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod dialog;
    pub mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 返回对应的视图组件；只有根路径随认证状态切换。
fn route_matcher(route: AppRoute, is_authenticated: Signal<bool>) -> AnyView {
    match route {
        AppRoute::Home => view! {
            <Show when=move || is_authenticated.get() fallback=|| view! { <LoginPage /> }>
                <ProductListPage />
            </Show>
        }
        .into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Profile(id) => view! { <ProfilePage id=id /> }.into_any(),
        // 路由守卫会把未知路径替换为根路径，这里不会真正渲染
        AppRoute::NotFound => ().into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取配置并创建 API 客户端
    let config = AppConfig::from_env();
    log!("[App] using API at {}", config.api_base_url);
    provide_context(CatalogApi::from_config(&config));

    // 2. 从 localStorage 恢复会话，整个应用共享这一份
    let session = SessionContext::load(BrowserSessionStore);
    provide_context(session);

    // 3. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = session.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
                <div class="max-w-7xl mx-auto space-y-8">
                    <Navbar />
                    <RouterOutlet matcher=route_matcher />
                </div>
            </div>
        </Router>
    }
}
