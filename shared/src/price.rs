//! 价格类型模块
//!
//! `Price` 是经过校验的非负有限小数，序列化为 JSON number。
//! 用户输入只在提交边界通过 `Price::parse` 转换，解析失败直接拒绝，
//! 不会产生 NaN 并发往服务器。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 价格校验错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("price is required")]
    Empty,
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("price must be a finite number")]
    NotFinite,
    #[error("price cannot be negative")]
    Negative,
}

/// 商品价格
///
/// 内部存储为 `f64`，与后端的 `FloatField` 保持一致。
/// 反序列化同样经过 `Price::new`，服务器返回的负数或非有限值会被拒绝。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// 从数值创建价格，拒绝负数与非有限值
    pub fn new(value: f64) -> Result<Self, PriceError> {
        if !value.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        // -0.0 归一化为 0.0
        Ok(Self(value.abs()))
    }

    /// 解析用户输入的价格文本
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| PriceError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// 编辑框中的初始文本
    ///
    /// `f64` 的 `Display` 是最短往返表示，因此 `parse(p.to_input()) == p`。
    pub fn to_input(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_plain_decimals() {
        assert_eq!(Price::parse("19.99").unwrap().value(), 19.99);
        assert_eq!(Price::parse("  7 ").unwrap().value(), 7.0);
        assert_eq!(Price::parse("0").unwrap().value(), 0.0);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(
            Price::parse("12abc"),
            Err(PriceError::NotANumber("12abc".to_string()))
        );
        assert_eq!(Price::parse("-1"), Err(PriceError::Negative));
        assert_eq!(Price::parse("NaN"), Err(PriceError::NotFinite));
        assert_eq!(Price::parse("inf"), Err(PriceError::NotFinite));
    }

    #[test]
    fn input_text_round_trips() {
        for raw in [0.1, 19.99, 20.0, 1234.5678] {
            let price = Price::new(raw).unwrap();
            assert_eq!(Price::parse(&price.to_input()).unwrap(), price);
        }
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Price::new(5.0).unwrap().to_string(), "$5.00");
        assert_eq!(Price::new(19.999).unwrap().to_string(), "$20.00");
    }

    #[test]
    fn serializes_as_json_number() {
        let json = serde_json::to_string(&Price::new(12.5).unwrap()).unwrap();
        assert_eq!(json, "12.5");
    }

    #[test]
    fn deserialization_applies_the_same_validation() {
        assert_eq!(serde_json::from_str::<Price>("2.5").unwrap().value(), 2.5);
        assert_eq!(serde_json::from_str::<Price>("3").unwrap().value(), 3.0);

        let err = serde_json::from_str::<Price>("-3.5").unwrap_err();
        assert!(err.to_string().contains("price cannot be negative"));
    }
}
