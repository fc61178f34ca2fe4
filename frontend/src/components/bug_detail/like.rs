//! 点赞开关
//!
//! 点击后本地标志立即翻转，随后发出开关请求，无论成功与否都重新拉取缺陷，
//! 点赞数只以重新拉取的结果为准。开关请求失败时本地标志恢复原值。

use bugboard_shared::{Ack, BugEnvelope, ToggleLikeRequest};

use crate::api::{self, ApiClient, Transport};
use crate::error::ApiResult;
use crate::web::KeyValueStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LikeFlag {
    liked: bool,
    pending: bool,
}

impl LikeFlag {
    pub fn is_liked(&self) -> bool {
        self.liked
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// 乐观翻转，返回翻转前的值；已有请求在途时返回 `None`
    pub fn begin(&mut self) -> Option<bool> {
        if self.pending {
            return None;
        }
        let previous = self.liked;
        self.liked = !previous;
        self.pending = true;
        Some(previous)
    }

    /// 请求结束：开关失败时恢复到 `previous`
    pub fn settle(&mut self, previous: bool, toggled: bool) {
        if !toggled {
            self.liked = previous;
        }
        self.pending = false;
    }
}

/// 先发开关请求，再无条件重新拉取缺陷
pub async fn like_and_refresh<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    bug_id: &str,
) -> (ApiResult<Ack>, ApiResult<BugEnvelope>) {
    let toggled = api::likes::toggle(api, &ToggleLikeRequest::bug(bug_id)).await;
    let refreshed = api::bugs::get(api, bug_id).await;
    (toggled, refreshed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Body;
    use crate::api::mock::MockTransport;
    use crate::config::STORAGE_BASE_URL_KEY;
    use crate::web::MemoryStore;
    use bugboard_shared::protocol::HttpMethod;
    use serde_json::json;

    fn create_client() -> ApiClient<MockTransport, MemoryStore> {
        let store = MemoryStore::with(&[(STORAGE_BASE_URL_KEY, "http://api.test")]);
        ApiClient::new(MockTransport::new(), store)
    }

    #[test]
    fn test_flag_flips_immediately() {
        let mut flag = LikeFlag::default();
        assert_eq!(flag.begin(), Some(false));
        assert!(flag.is_liked());
        assert!(flag.is_pending());

        // 在途时重复点击被忽略
        assert_eq!(flag.begin(), None);
        assert!(flag.is_liked());

        flag.settle(false, true);
        assert!(flag.is_liked());
        assert!(!flag.is_pending());
    }

    #[test]
    fn test_flag_reverts_on_failure() {
        let mut flag = LikeFlag::default();
        let previous = flag.begin().unwrap();
        flag.settle(previous, false);
        assert!(!flag.is_liked());
        assert!(!flag.is_pending());
    }

    #[tokio::test]
    async fn test_like_then_refetch() {
        let api = create_client();
        api.transport()
            .mock_response(HttpMethod::Post, "http://api.test/likes", 200, json!({ "message": "liked" }));
        api.transport().mock_response(
            HttpMethod::Get,
            "http://api.test/bugs/b1",
            200,
            json!({ "bug": { "bug_id": "b1", "title": "t", "likes_count": 4 } }),
        );

        let (toggled, refreshed) = like_and_refresh(&api, "b1").await;
        assert!(toggled.is_ok());
        assert_eq!(refreshed.unwrap().bug.unwrap().likes_count, 4);

        let reqs = api.transport().requests();
        assert_eq!(reqs.len(), 2);
        let Body::Json(body) = &reqs[0].body else {
            panic!("expected json body");
        };
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent, json!({ "target_type": "bug", "target_id": "b1" }));
    }

    #[tokio::test]
    async fn test_refetch_even_when_toggle_fails() {
        let api = create_client();
        api.transport()
            .mock_empty(HttpMethod::Post, "http://api.test/likes", 500);
        api.transport().mock_response(
            HttpMethod::Get,
            "http://api.test/bugs/b1",
            200,
            json!({ "bug": { "bug_id": "b1", "title": "t", "likes_count": 3 } }),
        );

        let (toggled, refreshed) = like_and_refresh(&api, "b1").await;
        assert_eq!(toggled.unwrap_err().status(), Some(500));
        assert_eq!(refreshed.unwrap().bug.unwrap().likes_count, 3);

        let reqs = api.transport().requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!((reqs[0].method, reqs[0].url.as_str()), (HttpMethod::Post, "http://api.test/likes"));
        assert_eq!((reqs[1].method, reqs[1].url.as_str()), (HttpMethod::Get, "http://api.test/bugs/b1"));
    }
}
