//! 运行配置
//!
//! API 基础地址在编译期由环境变量 `CATALOG_API_BASE_URL` 注入
//! (Trunk 构建时从 shell 环境读取)。

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 不带结尾 `/` 的 API 基础地址
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_value(option_env!("CATALOG_API_BASE_URL"))
    }

    fn from_value(raw: Option<&str>) -> Self {
        let api_base_url = raw
            .map(|value| value.trim().trim_end_matches('/'))
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string();
        Self { api_base_url }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_value(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_value_falls_back_to_default() {
        assert_eq!(AppConfig::from_value(None).api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(
            AppConfig::from_value(Some("   ")).api_base_url,
            DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = AppConfig::from_value(Some(" https://api.example.com// "));
        assert_eq!(config.api_base_url, "https://api.example.com");
    }
}
