//! 商品表格状态机
//!
//! 每行处于 `Viewing`（默认）或 `Editing` 状态，全局至多一行处于编辑中。
//! 所有转换都是同步的纯函数，网络调用由 `ProductListController` 负责。

use super::edit::{EditBuffer, EditField};
use super::pagination::{self, PageSize};
use catalog_shared::{PriceError, Product, ProductUpdate};

/// 状态机拒绝的操作
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("product `{0}` is not in the list")]
    UnknownProduct(String),
    #[error("product `{0}` is being edited; save or cancel it first")]
    EditInProgress(String),
    #[error("no row is being edited")]
    NotEditing,
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// 一次列表刷新的凭据
///
/// 序号单调递增，只有最新一次刷新的响应会被应用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTicket {
    seq: u64,
    query: String,
}

impl ListTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    products: Vec<Product>,
    search: String,
    page: usize,
    page_size: PageSize,
    edit: Option<EditBuffer>,
    latest_seq: u64,
    loading: bool,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // ---------------------------------------------------------
    // 搜索与刷新
    // ---------------------------------------------------------

    pub fn search(&self) -> &str {
        &self.search
    }

    /// 更新搜索文本，返回是否发生变化
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        true
    }

    /// 开始一次刷新，之前发出的请求全部作废
    pub fn begin_refresh(&mut self) -> ListTicket {
        self.latest_seq += 1;
        self.loading = true;
        ListTicket {
            seq: self.latest_seq,
            query: self.search.clone(),
        }
    }

    pub fn is_current(&self, ticket: &ListTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// 应用列表响应
    ///
    /// 过期响应被忽略并返回 `false`。应用后页码回到第一页；
    /// 若正在编辑的行已不在新列表中，则丢弃其缓冲区。
    pub fn apply_list(&mut self, ticket: &ListTicket, products: Vec<Product>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.products = products;
        self.page = 0;
        self.loading = false;
        let vanished = self
            .edit
            .as_ref()
            .is_some_and(|buffer| self.product(buffer.id()).is_none());
        if vanished {
            self.edit = None;
        }
        true
    }

    /// 刷新失败时结束加载状态（列表保持不变）
    pub fn fail_refresh(&mut self, ticket: &ListTicket) {
        if self.is_current(ticket) {
            self.loading = false;
        }
    }

    // ---------------------------------------------------------
    // 分页
    // ---------------------------------------------------------

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.products.len(), self.page_size)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = pagination::clamp_page(page, self.products.len(), self.page_size);
    }

    /// 修改每页行数并回到第一页
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page_size = size;
        self.page = 0;
    }

    /// 当前页显示的行
    pub fn visible(&self) -> &[Product] {
        let range = pagination::window(self.products.len(), self.page, self.page_size);
        self.products.get(range).unwrap_or_default()
    }

    /// 当前页的 (起始序号, 结束序号)，从 1 开始，用于 "1–10 of 57"
    pub fn visible_range(&self) -> (usize, usize) {
        let range = pagination::window(self.products.len(), self.page, self.page_size);
        if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        }
    }

    // ---------------------------------------------------------
    // 行内编辑
    // ---------------------------------------------------------

    pub fn editing_id(&self) -> Option<&str> {
        self.edit.as_ref().map(EditBuffer::id)
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing_id() == Some(id)
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    /// `Viewing --enterEdit--> Editing`
    ///
    /// 另一行正在编辑时拒绝切换，必须先保存或取消；对同一行重复进入不改变缓冲区。
    pub fn enter_edit(&mut self, id: &str) -> Result<(), EditError> {
        if let Some(current) = self.editing_id() {
            if current == id {
                return Ok(());
            }
            return Err(EditError::EditInProgress(current.to_string()));
        }
        let product = self
            .product(id)
            .ok_or_else(|| EditError::UnknownProduct(id.to_string()))?;
        self.edit = Some(EditBuffer::snapshot(product));
        Ok(())
    }

    /// `Editing --cancel--> Viewing`，返回被丢弃的缓冲区
    pub fn cancel_edit(&mut self) -> Option<EditBuffer> {
        self.edit.take()
    }

    /// 修改编辑缓冲区中的一个字段
    pub fn update_edit(&mut self, field: EditField) -> Result<(), EditError> {
        let buffer = self.edit.as_mut().ok_or(EditError::NotEditing)?;
        buffer.apply(field);
        Ok(())
    }

    /// 准备保存：校验价格并返回 (标识符, 更新体)
    pub fn prepare_save(&self) -> Result<(String, ProductUpdate), EditError> {
        let buffer = self.edit.as_ref().ok_or(EditError::NotEditing)?;
        let update = buffer.to_update()?;
        Ok((buffer.id().to_string(), update))
    }

    /// `Editing --save--> Viewing`：用服务器返回的记录替换本地条目
    pub fn apply_saved(&mut self, product: Product) {
        if self.is_editing(&product.id) {
            self.edit = None;
        }
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) {
            *slot = product;
        }
    }

    // ---------------------------------------------------------
    // 删除
    // ---------------------------------------------------------

    /// 删除只在 `Viewing` 状态的行上可用
    pub fn can_delete(&self, id: &str) -> bool {
        !self.is_editing(id) && self.product(id).is_some()
    }

    /// 从列表中移除指定标识符，返回是否移除了条目
    pub fn apply_deleted(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        if self.is_editing(id) {
            self.edit = None;
        }
        self.page = pagination::clamp_page(self.page, self.products.len(), self.page_size);
        self.products.len() != before
    }
}
