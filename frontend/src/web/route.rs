//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

const PROFILE_PREFIX: &str = "/profiles/";

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 根路径：已认证时显示商品列表，否则显示登录页
    #[default]
    Home,
    /// 注册页面
    Register,
    /// 个人资料详情
    Profile(String),
    /// 未知路径，统一重定向到根路径
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Home,
            "/register" => Self::Register,
            _ => match path.strip_prefix(PROFILE_PREFIX) {
                Some(id) if !id.is_empty() && !id.contains('/') => Self::Profile(id.to_string()),
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home | Self::NotFound => "/".to_string(),
            Self::Register => "/register".to_string(),
            Self::Profile(id) => format!("{}{}", PROFILE_PREFIX, id),
        }
    }

    /// 未知路径需要被替换为根路径
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Register)
    }

    /// 重定向目标
    pub fn fallback() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
