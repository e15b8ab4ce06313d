//! 个人资料查看
//!
//! 按路由中的标识符拉取一次，失败时给出明确的终态而不是一直转圈。

use crate::api::CatalogApi;
use crate::web::http::HttpClient;
use catalog_shared::Profile;
use leptos::logging::error;

pub const PROFILE_NOT_FOUND: &str = "Profile not found";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileView {
    #[default]
    Loading,
    Ready(Profile),
    Failed(String),
}

/// 拉取个人资料并转换为视图状态
pub async fn load_profile<C: HttpClient>(api: &CatalogApi<C>, id: &str) -> ProfileView {
    match api.get_profile(id).await {
        Ok(profile) => ProfileView::Ready(profile),
        Err(e) => {
            error!("[Profile] failed to load {}: {}", id, e);
            if e.status() == Some(404) {
                ProfileView::Failed(PROFILE_NOT_FOUND.to_string())
            } else {
                ProfileView::Failed(format!("Could not load profile: {}", e.user_message()))
            }
        }
    }
}

/// 列表字段的展示文本：逗号连接，空列表显示占位
pub fn join_list(items: &[String]) -> String {
    if items.is_empty() {
        "None listed".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::http::MockHttpClient;
    use catalog_shared::protocol::HttpMethod;
    use serde_json::json;

    fn api(client: &MockHttpClient) -> CatalogApi<MockHttpClient> {
        CatalogApi::new("http://api.test", client.clone())
    }

    #[tokio::test]
    async fn loads_profile_without_credentials() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://api.test/api/profiles/abc",
            200,
            json!({
                "id": "abc",
                "name": "Ada",
                "email": "ada@example.com",
                "interests": ["math", "engines"],
                "achievements": null
            }),
        );

        let view = load_profile(&api(&client), "abc").await;

        let ProfileView::Ready(profile) = view else {
            panic!("expected a loaded profile, got {:?}", view);
        };
        assert_eq!(profile.name, "Ada");
        assert_eq!(join_list(&profile.interests), "math, engines");
        assert_eq!(join_list(&profile.achievements), "None listed");
        assert!(client.last_request().unwrap().header("Authorization").is_none());
    }

    #[tokio::test]
    async fn missing_profile_is_a_terminal_state() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            "http://api.test/api/profiles/nope",
            404,
            json!({"error": "Profile not found"}),
        );

        assert_eq!(
            load_profile(&api(&client), "nope").await,
            ProfileView::Failed(PROFILE_NOT_FOUND.to_string())
        );
    }

    #[tokio::test]
    async fn network_failure_is_reported() {
        let client = MockHttpClient::new();

        let view = load_profile(&api(&client), "abc").await;

        assert!(matches!(view, ProfileView::Failed(msg) if msg.starts_with("Could not load profile")));
    }
}
