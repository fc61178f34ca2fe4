//! 测试工具: MockTransport
//!
//! 按 "方法 + 不含查询串的 URL" 匹配预设响应，同一地址可以排队多个响应；
//! 没有预设时返回 404。所有发出的请求都会被记录。

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use bugboard_shared::protocol::HttpMethod;

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::{ApiError, ApiResult};

/// 测试中用文件名代替真实的文件句柄
pub type MockUpload = String;

type Reply = Result<(u16, String), String>;

#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Rc<RefCell<HashMap<String, VecDeque<Reply>>>>,
    requests: Rc<RefCell<Vec<HttpRequest<MockUpload>>>>,
}

fn route_key(method: HttpMethod, url: &str) -> String {
    let path = url.split('?').next().unwrap_or(url);
    format!("{} {}", method.as_str(), path)
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.push(method, url, Ok((status, body.to_string())));
    }

    pub fn mock_empty(&self, method: HttpMethod, url: &str, status: u16) {
        self.push(method, url, Ok((status, String::new())));
    }

    pub fn mock_raw(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.push(method, url, Ok((status, body.to_string())));
    }

    pub fn mock_network_error(&self, method: HttpMethod, url: &str) {
        self.push(method, url, Err("connection refused".to_string()));
    }

    fn push(&self, method: HttpMethod, url: &str, reply: Reply) {
        self.replies
            .borrow_mut()
            .entry(route_key(method, url))
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest<MockUpload>> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    type Upload = MockUpload;

    async fn send(&self, req: HttpRequest<MockUpload>) -> ApiResult<HttpResponse> {
        let key = route_key(req.method, &req.url);
        self.requests.borrow_mut().push(req);

        let reply = self
            .replies
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(Ok((status, body))) => Ok(HttpResponse { status, body }),
            Some(Err(e)) => Err(ApiError::Transport(e)),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
