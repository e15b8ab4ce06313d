//! 行内编辑缓冲区
//!
//! 进入编辑模式时对一行做快照，之后的字段修改只作用于缓冲区。
//! 价格以原始文本保存，保存时才通过 `Price::parse` 校验。

use catalog_shared::{Price, PriceError, Product, ProductUpdate};

/// 可编辑字段的一次修改
#[derive(Debug, Clone, PartialEq)]
pub enum EditField {
    Name(String),
    Price(String),
    Category(String),
    InStock(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    id: String,
    pub name: String,
    /// 价格输入框的原始文本
    pub price: String,
    pub category: String,
    pub in_stock: bool,
    original: ProductUpdate,
}

impl EditBuffer {
    pub fn snapshot(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.to_input(),
            category: product.category.clone(),
            in_stock: product.in_stock,
            original: product.to_update(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn apply(&mut self, field: EditField) {
        match field {
            EditField::Name(v) => self.name = v,
            EditField::Price(v) => self.price = v,
            EditField::Category(v) => self.category = v,
            EditField::InStock(v) => self.in_stock = v,
        }
    }

    /// 当前价格文本的校验错误（用于行内提示）
    pub fn price_error(&self) -> Option<PriceError> {
        Price::parse(&self.price).err()
    }

    /// 与快照相比是否有改动
    pub fn is_dirty(&self) -> bool {
        self.to_update().map_or(true, |update| update != self.original)
    }

    /// 组装更新请求体（不含标识符）
    pub fn to_update(&self) -> Result<ProductUpdate, PriceError> {
        Ok(ProductUpdate {
            name: self.name.clone(),
            price: Price::parse(&self.price)?,
            category: self.category.clone(),
            in_stock: self.in_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Product {
        Product {
            id: "p7".into(),
            name: "Lamp".into(),
            price: Price::new(19.99).unwrap(),
            category: "home".into(),
            in_stock: true,
        }
    }

    #[test]
    fn untouched_snapshot_reproduces_the_row() {
        let buffer = EditBuffer::snapshot(&lamp());
        assert_eq!(buffer.id(), "p7");
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.to_update().unwrap(), lamp().to_update());
    }

    #[test]
    fn edits_touch_only_the_buffer() {
        let product = lamp();
        let mut buffer = EditBuffer::snapshot(&product);
        buffer.apply(EditField::Name("Desk lamp".into()));
        buffer.apply(EditField::InStock(false));

        assert!(buffer.is_dirty());
        assert_eq!(product.name, "Lamp");
        let update = buffer.to_update().unwrap();
        assert_eq!(update.name, "Desk lamp");
        assert!(!update.in_stock);
    }

    #[test]
    fn invalid_price_is_reported_not_coerced() {
        let mut buffer = EditBuffer::snapshot(&lamp());
        buffer.apply(EditField::Price("twelve".into()));

        assert_eq!(
            buffer.price_error(),
            Some(PriceError::NotANumber("twelve".into()))
        );
        assert!(buffer.to_update().is_err());
        assert!(buffer.is_dirty());

        buffer.apply(EditField::Price("12".into()));
        assert_eq!(buffer.price_error(), None);
        assert_eq!(buffer.to_update().unwrap().price.value(), 12.0);
    }
}
