//! API 错误类型
//!
//! 两类失败：网络层失败（请求没有拿到响应）与后端返回的非 2xx 响应。
//! 由调用方决定向用户展示什么文案。

use bugboard_shared::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求构建或网络传输失败
    #[error("network error: {0}")]
    Transport(String),

    /// 后端返回非 2xx，`message` 取自响应体的 `message` 字段
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// 成功响应的响应体无法解析
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// 成功响应缺少必需的字段（如登录响应没有 token）
    #[error("incomplete response: missing {0}")]
    Incomplete(&'static str),

    /// 请求体序列化失败
    #[error("invalid request body: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 从非 2xx 响应构建错误，尝试提取后端给出的 `message`
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 后端提供的可读信息
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// 后端信息优先，否则使用调用方给出的兜底文案
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_server_message() {
        let err = ApiError::from_status(400, r#"{"message":"Title is required"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.message_or("Failed"), "Title is required");
    }

    #[test]
    fn test_falls_back_without_message() {
        let err = ApiError::from_status(500, "<html>Internal Server Error</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.message_or("Failed to submit bug report"), "Failed to submit bug report");

        let err = ApiError::from_status(422, r#"{"message":"  "}"#);
        assert_eq!(err.server_message(), None);

        let err = ApiError::Transport("offline".into());
        assert_eq!(err.message_or("Failed"), "Failed");
    }
}
