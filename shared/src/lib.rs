//! 商品目录前端与 REST API 之间共享的领域模型

use serde::{Deserialize, Serialize};

mod price;
pub mod protocol;
mod serde_helper;

pub use price::{Price, PriceError};
pub use serde_helper::null_as_default;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 会话在 localStorage 中的键
pub const STORAGE_KEY_SESSION: &str = "auth";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// 具有管理权限的角色值
pub const ROLE_ADMIN: &str = "admin";

// =========================================================
// 商品 (Product)
// =========================================================

/// 服务器返回的商品记录
///
/// 标识符由服务器分配且不可变，JSON 字段名为 `_id`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(rename = "inStock", default, deserialize_with = "null_as_default")]
    pub in_stock: bool,
}

impl Product {
    /// 提取可编辑字段（不含标识符）
    pub fn to_update(&self) -> ProductUpdate {
        ProductUpdate {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            in_stock: self.in_stock,
        }
    }
}

/// 更新请求体
///
/// 类型上不包含标识符字段，保证更新时不会把 `_id` 发回服务器。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

/// `DELETE` 的响应体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
}

// =========================================================
// 会话 (Session)
// =========================================================

/// 会话角色
///
/// 只有 `"admin"` 具有管理权限，其它任何值都视为普通用户，但原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Other(String),
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Other(value) => value,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value == ROLE_ADMIN {
            Role::Admin
        } else {
            Role::Other(value)
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => ROLE_ADMIN.to_string(),
            Role::Other(value) => value,
        }
    }
}

/// 客户端持有的会话：bearer token + 角色
///
/// 登录接口的响应体与持久化格式都是 `{"token": "...", "role": "..."}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

// =========================================================
// 认证请求 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 注册时可选的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterRole {
    #[default]
    Consumer,
    Admin,
}

impl RegisterRole {
    pub const ALL: [RegisterRole; 2] = [RegisterRole::Consumer, RegisterRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterRole::Consumer => "consumer",
            RegisterRole::Admin => ROLE_ADMIN,
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub role: RegisterRole,
}

/// 只包含提示信息的响应体（注册、认证失败等）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// =========================================================
// 个人资料 (Profile)
// =========================================================

/// 只读的个人资料记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub achievements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_decodes_server_shape() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Widget",
            "price": 9.5,
            "category": null,
            "inStock": true
        }))
        .unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.price.value(), 9.5);
        assert_eq!(product.category, "");
        assert!(product.in_stock);
    }

    #[test]
    fn product_with_negative_price_is_rejected() {
        let decoded = serde_json::from_value::<Product>(json!({
            "_id": "p1",
            "name": "Widget",
            "price": -3.5,
            "category": "tools",
            "inStock": true
        }));

        assert!(decoded.is_err());
    }

    #[test]
    fn update_body_never_carries_an_identifier() {
        let product = Product {
            id: "p1".into(),
            name: "Widget".into(),
            price: Price::new(3.0).unwrap(),
            category: "tools".into(),
            in_stock: false,
        };

        let body = serde_json::to_value(product.to_update()).unwrap();
        assert_eq!(
            body,
            json!({"name": "Widget", "price": 3.0, "category": "tools", "inStock": false})
        );
        assert!(body.get("_id").is_none());
        assert!(body.get("id").is_none());
    }

    #[test]
    fn role_keeps_unknown_values() {
        let session: Session =
            serde_json::from_str(r#"{"token": "t", "role": "consumer"}"#).unwrap();
        assert!(!session.is_admin());
        assert_eq!(session.role.as_str(), "consumer");

        let admin: Session = serde_json::from_str(r#"{"token": "t", "role": "admin"}"#).unwrap();
        assert!(admin.is_admin());
        assert_eq!(
            serde_json::to_value(&admin).unwrap(),
            json!({"token": "t", "role": "admin"})
        );
    }

    #[test]
    fn role_match_is_exact() {
        assert!(!Role::from("Admin".to_string()).is_admin());
        assert!(!Role::from(String::new()).is_admin());
    }

    #[test]
    fn profile_ignores_extra_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "_id": "abc",
            "id": "abc",
            "name": "Ada",
            "email": "ada@example.com",
            "interests": ["math", "engines"],
            "achievements": null,
            "createdAt": "Mon, 01 Jan 2024 00:00:00 GMT"
        }))
        .unwrap();

        assert_eq!(profile.id, "abc");
        assert_eq!(profile.interests, vec!["math", "engines"]);
        assert!(profile.achievements.is_empty());
        assert_eq!(profile.year, "");
    }

    #[test]
    fn register_role_serializes_lowercase() {
        let reg = Registration {
            username: "u".into(),
            password: "p".into(),
            role: RegisterRole::Consumer,
        };
        assert_eq!(serde_json::to_value(&reg).unwrap()["role"], "consumer");
        assert_eq!(RegisterRole::from_value("admin"), Some(RegisterRole::Admin));
        assert_eq!(RegisterRole::from_value("root"), None);
    }
}
