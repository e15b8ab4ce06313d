//! 商品列表控制器
//!
//! 持有内存中的商品列表、搜索文本、分页游标和至多一行的编辑状态；
//! 发起 API 调用并把结果合并回本地状态。
//!
//! - `pagination`: 客户端分页窗口
//! - `edit`: 行内编辑缓冲区
//! - `state`: 纯同步状态机

mod edit;
mod pagination;
mod state;

pub use edit::{EditBuffer, EditField};
pub use pagination::PageSize;
pub use state::{EditError, TableState};

use crate::api::CatalogApi;
use crate::auth::SessionContext;
use crate::error::ApiError;
use crate::session::SessionStore;
use crate::web::http::HttpClient;
use catalog_shared::Session;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;

pub const SESSION_EXPIRED_ALERT: &str = "Your session has expired. Please log in again.";

/// 触发网络调用的用户操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Save,
    Delete,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Refresh => "list",
            Action::Save => "update",
            Action::Delete => "delete",
        }
    }
}

/// 一次操作的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 结果已合并到本地状态
    Applied,
    /// 无需处理（过期的列表响应、正在编辑的行上的删除）
    Ignored,
    /// 客户端校验拒绝，未发出请求
    Invalid(EditError),
    /// 服务器返回 401，会话已被清除
    SessionExpired(Action),
    Failed { action: Action, error: ApiError },
}

impl Outcome {
    /// 需要弹窗告知用户的消息
    ///
    /// 只有保存路径会打扰用户；列表与删除失败仅记录日志。
    pub fn alert(&self) -> Option<String> {
        match self {
            Outcome::Invalid(EditError::NotEditing) => None,
            Outcome::Invalid(e) => Some(format!("Cannot save: {}", e)),
            Outcome::SessionExpired(Action::Save) => Some(SESSION_EXPIRED_ALERT.to_string()),
            Outcome::Failed {
                action: Action::Save,
                error,
            } => Some(format!("Update failed: {}", error.user_message())),
            _ => None,
        }
    }
}

/// 管理操作列是否可见
///
/// 仅是展示层的开关，真正的权限由服务器判定。
pub fn actions_visible(session: Option<&Session>) -> bool {
    session.is_some_and(Session::is_admin)
}

/// 列表刷新的输入：搜索文本与会话 token
///
/// 两者任一变化都会触发一次刷新；值未变时不重复请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshKey {
    search: String,
    token: String,
}

/// 商品列表控制器
///
/// 状态保存在 `RwSignal` 中驱动视图，控制器本身可廉价克隆进各个事件处理闭包。
#[derive(Clone)]
pub struct ProductListController<C, S> {
    api: CatalogApi<C>,
    session: SessionContext<S>,
    state: RwSignal<TableState>,
}

impl<C: HttpClient + Clone, S: SessionStore + Clone> ProductListController<C, S> {
    pub fn new(api: CatalogApi<C>, session: SessionContext<S>) -> Self {
        Self {
            api,
            session,
            state: RwSignal::new(TableState::new()),
        }
    }

    pub fn state(&self) -> RwSignal<TableState> {
        self.state
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    /// 管理操作列是否可见，随会话变化
    pub fn actions_signal(&self) -> Signal<bool> {
        let session = self.session.session_signal();
        Signal::derive(move || session.with(|s| actions_visible(s.as_ref())))
    }

    /// 当前的刷新键（在响应式上下文中追踪搜索文本与会话）
    ///
    /// 未登录时返回 `None`，此时不发起列表请求。
    pub fn refresh_key(&self) -> Option<RefreshKey> {
        let token = self
            .session
            .session_signal()
            .with(|s| s.as_ref().map(|s| s.token.clone()))?;
        let search = self.state.with(|s| s.search().to_string());
        Some(RefreshKey { search, token })
    }

    /// 统一的失败处理：401 清除会话，其余记录日志
    fn fail(&self, action: Action, err: ApiError) -> Outcome {
        error!("[Catalog] {} failed: {}", action.label(), err);
        if err.is_unauthorized() {
            self.session.invalidate(&format!("{} rejected", action.label()));
            Outcome::SessionExpired(action)
        } else {
            Outcome::Failed { action, error: err }
        }
    }

    /// 更新搜索文本（不发请求，刷新由视图层的 Effect 触发）
    pub fn set_search(&self, search: String) {
        self.state.update(|s| {
            s.set_search(search);
        });
    }

    /// 重新拉取列表
    ///
    /// 使用当前搜索文本与 token；晚于后续刷新返回的响应会被丢弃。
    pub async fn refresh(&self) -> Outcome {
        let Some(ticket) = self.state.try_update(TableState::begin_refresh) else {
            return Outcome::Ignored;
        };
        let token = self.session.token();

        match self.api.list_products(token.as_deref(), ticket.query()).await {
            Ok(products) => {
                let count = products.len();
                let applied = self
                    .state
                    .try_update(|s| s.apply_list(&ticket, products))
                    .unwrap_or(false);
                if applied {
                    log!("[Catalog] loaded {} products for '{}'", count, ticket.query());
                    Outcome::Applied
                } else {
                    Outcome::Ignored
                }
            }
            Err(err) => {
                self.state.update(|s| s.fail_refresh(&ticket));
                self.fail(Action::Refresh, err)
            }
        }
    }

    pub fn enter_edit(&self, id: &str) -> Result<(), EditError> {
        self.state
            .try_update(|s| s.enter_edit(id))
            .unwrap_or(Err(EditError::NotEditing))
    }

    pub fn cancel_edit(&self) {
        self.state.update(|s| {
            s.cancel_edit();
        });
    }

    pub fn update_edit(&self, field: EditField) {
        self.state.update(|s| {
            if let Err(e) = s.update_edit(field) {
                warn!("[Catalog] ignoring edit: {}", e);
            }
        });
    }

    /// 保存正在编辑的行
    ///
    /// 价格校验失败时不发请求；401 时行保持编辑状态（不回滚）。
    pub async fn save(&self) -> Outcome {
        let (id, fields) = match self.state.with_untracked(TableState::prepare_save) {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!("[Catalog] save rejected: {}", e);
                return Outcome::Invalid(e);
            }
        };
        let token = self.session.token();

        match self.api.update_product(token.as_deref(), &id, &fields).await {
            Ok(product) => {
                self.state.update(|s| s.apply_saved(product));
                log!("[Catalog] saved product {}", id);
                Outcome::Applied
            }
            Err(err) => self.fail(Action::Save, err),
        }
    }

    /// 删除一行（仅限非编辑状态的行）
    pub async fn delete(&self, id: String) -> Outcome {
        if !self.state.with_untracked(|s| s.can_delete(&id)) {
            return Outcome::Ignored;
        }
        let token = self.session.token();

        match self.api.delete_product(token.as_deref(), &id).await {
            Ok(deleted) => {
                if !deleted {
                    warn!("[Catalog] server reported nothing deleted for {}", id);
                }
                self.state.update(|s| {
                    s.apply_deleted(&id);
                });
                Outcome::Applied
            }
            Err(err) => self.fail(Action::Delete, err),
        }
    }
}
