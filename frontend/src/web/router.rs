//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::logging::log;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 守卫：根据认证状态决定最终落地的路由
///
/// 返回 `(目标路由, 是否发生了重定向)`。
fn resolve(target: AppRoute, is_auth: bool) -> (AppRoute, bool) {
    if target.is_catch_all() {
        return (AppRoute::fallback(), true);
    }
    if target.should_redirect_when_authenticated() && is_auth {
        return (AppRoute::fallback(), true);
    }
    (target, false)
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        // 初始路由同样经过守卫，未知路径直接替换为根路径
        let (initial_route, redirected) = resolve(
            AppRoute::from_path(&current_path()),
            is_authenticated.get_untracked(),
        );
        if redirected {
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate_to_route(&self, target_route: AppRoute) {
        let (route, redirected) = resolve(target_route, self.is_authenticated.get_untracked());
        if redirected {
            log!("[Router] Redirecting to {}", route);
            replace_history_state(&route.to_path());
        } else {
            push_history_state(&route.to_path());
        }
        self.set_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        let closure = Closure::<dyn Fn()>::new(move || {
            let (route, redirected) = resolve(
                AppRoute::from_path(&current_path()),
                is_authenticated.get_untracked(),
            );
            if redirected {
                replace_history_state(&route.to_path());
            }
            set_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 根路径本身会随认证状态在列表与登录页之间切换，
    /// 这里只需处理“已登录却停留在注册页”的情况。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                let redirect = AppRoute::fallback();
                replace_history_state(&redirect.to_path());
                set_route.set(redirect);
                log!("[Router] Auth state changed: logged in, leaving {}.", route);
            } else if !is_auth {
                log!("[Router] Auth state changed: logged out.");
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    expect_context::<RouterService>()
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 出口渲染的路由：导航到相同路由不会触发重建
fn outlet_route(route: ReadSignal<AppRoute>) -> Memo<AppRoute> {
    Memo::new(move |_| route.get())
}

/// 出口的渲染函数
///
/// 外层只追踪路由；认证信号交给匹配函数，由需要的分支自行读取。
fn outlet_view<V: 'static>(
    route: Memo<AppRoute>,
    is_authenticated: Signal<bool>,
    matcher: fn(AppRoute, Signal<bool>) -> V,
) -> impl Fn() -> V + Clone + Send + Sync + 'static {
    move || matcher(route.get(), is_authenticated)
}

/// 路由出口组件
///
/// 根据当前路由渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由与认证信号，返回对应视图
    matcher: fn(AppRoute, Signal<bool>) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    outlet_view(
        outlet_route(router.current_route()),
        router.is_authenticated,
        matcher,
    )
}

/// 站内链接：拦截点击并通过路由服务导航
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.to_path();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate_to_route(to.clone());
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
