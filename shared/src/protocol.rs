//! 后端 REST 端点定义
//!
//! 每个端点对应一个 HTTP 方法与路径。路径中的动态段在这里统一做百分号编码。

use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 客户端会调用的全部端点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Signup,
    Login,
    ListBugs,
    GetBug(String),
    CreateBug,
    UpdateBug(String),
    DeleteBug(String),
    AddComment(String),
    DeleteComment(String),
    ToggleLike,
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::Health | Endpoint::ListBugs | Endpoint::GetBug(_) => HttpMethod::Get,
            Endpoint::Signup
            | Endpoint::Login
            | Endpoint::CreateBug
            | Endpoint::AddComment(_)
            | Endpoint::ToggleLike => HttpMethod::Post,
            Endpoint::UpdateBug(_) => HttpMethod::Put,
            Endpoint::DeleteBug(_) | Endpoint::DeleteComment(_) => HttpMethod::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Health => "/health".to_string(),
            Endpoint::Signup => "/auth/signup".to_string(),
            Endpoint::Login => "/auth/login".to_string(),
            Endpoint::ListBugs | Endpoint::CreateBug => "/bugs".to_string(),
            Endpoint::GetBug(id) | Endpoint::UpdateBug(id) | Endpoint::DeleteBug(id) => {
                format!("/bugs/{}", encode_segment(id))
            }
            Endpoint::AddComment(bug_id) => format!("/comments/{}", encode_segment(bug_id)),
            Endpoint::DeleteComment(id) => format!("/comments/{}", encode_segment(id)),
            Endpoint::ToggleLike => "/likes".to_string(),
        }
    }

    /// 是否携带 Bearer Token。注册和登录请求不带。
    pub fn sends_token(&self) -> bool {
        !matches!(self, Endpoint::Signup | Endpoint::Login)
    }
}

/// 对路径段做百分号编码
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_table() {
        assert_eq!(Endpoint::Health.method(), HttpMethod::Get);
        assert_eq!(Endpoint::ListBugs.path(), "/bugs");
        assert_eq!(Endpoint::CreateBug.method(), HttpMethod::Post);
        assert_eq!(Endpoint::UpdateBug("b1".into()).method(), HttpMethod::Put);
        assert_eq!(Endpoint::DeleteBug("b1".into()).path(), "/bugs/b1");
        assert_eq!(Endpoint::AddComment("b1".into()).path(), "/comments/b1");
        assert_eq!(Endpoint::DeleteComment("c9".into()).method(), HttpMethod::Delete);
        assert_eq!(Endpoint::ToggleLike.path(), "/likes");
    }

    #[test]
    fn test_auth_endpoints_skip_token() {
        assert!(!Endpoint::Login.sends_token());
        assert!(!Endpoint::Signup.sends_token());
        assert!(Endpoint::Health.sends_token());
        assert!(Endpoint::ListBugs.sends_token());
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(Endpoint::GetBug("a/b c".into()).path(), "/bugs/a%2Fb%20c");
    }
}
