use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::http::{FetchClient, HttpClient, HttpRequest};
use catalog_shared::protocol::{
    ApiRequest, DeleteProduct, GetProfile, ListProducts, Login, Register, Resource, SearchProducts,
    UpdateProduct,
};
use catalog_shared::{
    Credentials, HEADER_AUTHORIZATION, Product, ProductUpdate, Profile, Registration, Session,
};
use leptos::prelude::expect_context;

/// 商品目录 REST API 客户端
///
/// 绑定一个基础地址；商品资源的调用在有 token 时附带 `Authorization: Bearer`。
#[derive(Clone, Debug)]
pub struct CatalogApi<C = FetchClient> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> CatalogApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, resource: Resource, path: &str) -> String {
        format!("{}{}{}", self.base_url, resource.root(), path)
    }

    /// 发送一个协议请求并解析响应
    async fn call<R: ApiRequest>(&self, request: &R, token: Option<&str>) -> ApiResult<R::Response> {
        let mut http = HttpRequest::new(self.url(R::RESOURCE, &request.path()), R::METHOD)
            .with_header("Accept", "application/json");

        if R::RESOURCE.sends_bearer() {
            if let Some(token) = token {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if let Some(body) = request.body() {
            let json = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(json);
        }

        let res = self.client.send(http).await?;
        if !res.ok() {
            return Err(ApiError::from_response(res.status, &res.body));
        }

        res.json::<R::Response>().map_err(ApiError::from)
    }

    /// 获取商品列表
    ///
    /// 查询为空（或只有空白）时列出全部，否则按名称做服务端子串搜索。
    pub async fn list_products(&self, token: Option<&str>, query: &str) -> ApiResult<Vec<Product>> {
        if query.trim().is_empty() {
            self.call(&ListProducts, token).await
        } else {
            let req = SearchProducts {
                name: query.to_string(),
            };
            self.call(&req, token).await
        }
    }

    /// 更新商品，返回服务器的规范记录
    pub async fn update_product(
        &self,
        token: Option<&str>,
        id: &str,
        fields: &ProductUpdate,
    ) -> ApiResult<Product> {
        let req = UpdateProduct {
            id: id.to_string(),
            fields: fields.clone(),
        };
        self.call(&req, token).await
    }

    /// 删除商品
    ///
    /// 返回服务器是否确实删除了记录。
    pub async fn delete_product(&self, token: Option<&str>, id: &str) -> ApiResult<bool> {
        let req = DeleteProduct { id: id.to_string() };
        Ok(self.call(&req, token).await?.success)
    }

    pub async fn get_profile(&self, id: &str) -> ApiResult<Profile> {
        self.call(&GetProfile { id: id.to_string() }, None).await
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<Session> {
        self.call(&Login(credentials.clone()), None).await
    }

    /// 注册新用户，返回服务器提示信息
    pub async fn register(&self, registration: &Registration) -> ApiResult<String> {
        Ok(self
            .call(&Register(registration.clone()), None)
            .await?
            .message)
    }
}

impl CatalogApi {
    /// 使用浏览器 fetch 的生产客户端
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone(), FetchClient)
    }
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> CatalogApi {
    expect_context::<CatalogApi>()
}
