//! 后端 API 客户端
//!
//! `ApiClient` 是唯一的 HTTP 出口：每次发送前重新读取后端地址和 Token，
//! 因此登录、注销或修改后端地址后无需重建客户端。
//! 各资源的调用按模块划分，每个函数对应一个 REST 操作：
//! - `auth`: 注册、登录
//! - `bugs`: 缺陷报告的增删改查
//! - `comments`: 评论
//! - `likes`: 点赞
//! - `system`: 健康检查

pub mod auth;
pub mod bugs;
pub mod comments;
pub mod likes;
pub mod system;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use bugboard_shared::protocol::{Endpoint, HttpMethod};
use bugboard_shared::HEADER_AUTHORIZATION;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::web::{BrowserStorage, FetchTransport, KeyValueStore};

/// Token 在 LocalStorage 中的键
pub const STORAGE_TOKEN_KEY: &str = "token";

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// multipart 表单中的一个字段
#[derive(Debug, Clone, PartialEq)]
pub enum Part<F> {
    Text { name: String, value: String },
    File { name: String, file: F },
}

/// 有序的 multipart 表单，`F` 是具体传输层的文件句柄类型
#[derive(Debug, Clone, PartialEq)]
pub struct Multipart<F> {
    parts: Vec<Part<F>>,
}

impl<F> Default for Multipart<F> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<F> Multipart<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: &str, file: F) -> Self {
        self.parts.push(Part::File {
            name: name.to_string(),
            file,
        });
        self
    }

    pub fn parts(&self) -> &[Part<F>] {
        &self.parts
    }

    /// 第一个同名文本字段的值
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// 同名文件字段，保持添加顺序
    pub fn files(&self, name: &str) -> Vec<&F> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::File { name: n, file } if n == name => Some(file),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body<F> {
    Empty,
    Json(String),
    Multipart(Multipart<F>),
}

/// 已经解析好地址和请求头、可以直接发送的请求
#[derive(Debug, Clone)]
pub struct HttpRequest<F> {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Body<F>,
}

impl<F> HttpRequest<F> {
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 传输层：只负责把一个请求送出去并拿回响应，不做重试和超时
#[async_trait(?Send)]
pub trait Transport {
    /// multipart 中文件字段的句柄类型
    type Upload: Clone;

    async fn send(&self, req: HttpRequest<Self::Upload>) -> ApiResult<HttpResponse>;
}

// =========================================================
// ApiClient
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct ApiClient<T = FetchTransport, S = BrowserStorage> {
    transport: T,
    store: S,
}

impl ApiClient {
    /// 浏览器环境下的客户端（fetch + LocalStorage）
    pub fn browser() -> Self {
        Self::new(FetchTransport, BrowserStorage)
    }
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self { transport, store }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 当前持久化的 Token（空字符串视为没有）
    fn token(&self) -> Option<String> {
        self.store
            .get(STORAGE_TOKEN_KEY)
            .filter(|t| !t.trim().is_empty())
    }

    fn url(&self, endpoint: &Endpoint, query: &[(&'static str, String)]) -> String {
        let mut url = format!("{}{}", AppConfig::base_url(&self.store), endpoint.path());
        if !query.is_empty() {
            let qs = query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&qs);
        }
        url
    }

    /// 构建请求：在发送前一刻解析后端地址并附加认证头
    pub fn prepare(
        &self,
        endpoint: &Endpoint,
        query: &[(&'static str, String)],
        body: Body<T::Upload>,
    ) -> HttpRequest<T::Upload> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        // multipart 的 Content-Type 由浏览器生成（含 boundary）
        if matches!(body, Body::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if endpoint.sends_token() {
            if let Some(token) = self.token() {
                headers.push((HEADER_AUTHORIZATION.to_string(), format!("Bearer {}", token)));
            }
        }
        HttpRequest {
            method: endpoint.method(),
            url: self.url(endpoint, query),
            headers,
            body,
        }
    }

    /// 发送请求，非 2xx 转为 `ApiError::Status`
    pub async fn execute(&self, req: HttpRequest<T::Upload>) -> ApiResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        let resp = self.transport.send(req).await.inspect_err(|e| {
            log::warn!("[Api] {} {} failed: {}", method.as_str(), url, e);
        })?;

        if !resp.ok() {
            log::warn!("[Api] {} {} -> {}", method.as_str(), url, resp.status);
            return Err(ApiError::from_status(resp.status, &resp.body));
        }
        Ok(resp)
    }

    /// 发送请求并解码响应体；空响应体（如 204）解码为默认值
    pub(crate) async fn call<R: DeserializeOwned + Default>(
        &self,
        endpoint: Endpoint,
        query: &[(&'static str, String)],
        body: Body<T::Upload>,
    ) -> ApiResult<R> {
        let req = self.prepare(&endpoint, query, body);
        let resp = self.execute(req).await?;
        if resp.body.trim().is_empty() {
            return Ok(R::default());
        }
        serde_json::from_str(&resp.body).map_err(ApiError::Decode)
    }
}

/// 将请求对象序列化为 JSON 请求体
pub(crate) fn json_body<B: Serialize, F>(value: &B) -> ApiResult<Body<F>> {
    serde_json::to_string(value)
        .map(Body::Json)
        .map_err(ApiError::Encode)
}

/// 从 Context 获取浏览器环境的 API 客户端
pub fn use_api() -> ApiClient {
    leptos::prelude::use_context::<ApiClient>().expect("ApiClient should be provided")
}
