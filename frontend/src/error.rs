//! API 错误分类
//!
//! - `Unauthorized`: 401，表示会话失效，所有调用方统一处理
//! - `Status`: 其它非 2xx 状态，携带服务器返回的消息
//! - `Network` / `Decode` / `Encode`: 传输与编解码失败

use crate::web::http::HttpError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// 根据非 2xx 响应构造错误
    ///
    /// 消息优先取 JSON 中的 `error` 字段，其次 `message`，都没有时使用通用描述。
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = server_message(body)
            .unwrap_or_else(|| format!("request failed with status {}", status));
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 面向用户的提示文本
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::RequestBuildFailed(msg) => {
                ApiError::Network(format!("could not build request: {}", msg))
            }
            HttpError::NetworkError(msg) => ApiError::Network(msg),
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
        }
    }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_distinguished() {
        let err = ApiError::from_response(401, r#"{"message": "Token has expired. Please login again."}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Token has expired. Please login again.");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn error_field_wins_over_message() {
        let err = ApiError::from_response(404, r#"{"error": "Product with ID x not found", "message": "other"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                message: "Product with ID x not found".to_string()
            }
        );
    }

    #[test]
    fn falls_back_to_generic_message() {
        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message(), "request failed with status 502");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::from(HttpError::NetworkError("offline".into()));
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "network error: offline");
    }
}
