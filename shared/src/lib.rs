//! Bugboard 共享模型
//!
//! 前端与后端 API 之间传输的领域模型和请求/响应结构。
//! 不依赖任何浏览器 API，可以直接在宿主机上测试。

use serde::{Deserialize, Deserializer, Serialize};

pub mod date;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";

/// 将 `null` 或缺失字段解码为默认值
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =========================================================
// 严重程度 (Severity)
// =========================================================

/// 缺陷严重程度
///
/// 变体按紧急程度升序声明，因此 `Ord` 满足 `Critical > High > Medium > Low`。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// 表单下拉框的显示顺序
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// 解析线上的严重程度字符串，未知或缺失的值回退为 `Medium`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("critical") => Severity::Critical,
            Some("high") => Severity::High,
            Some("low") => Severity::Low,
            _ => Severity::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(alias = "id")]
    pub comment_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub parent_comment_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Unknown User")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    #[serde(alias = "id")]
    pub bug_id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub topic: String,
    /// 原始的线上值，渲染时通过 [`Bug::severity`] 解析
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,
    #[serde(default, deserialize_with = "nullable")]
    pub likes_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

impl Bug {
    pub fn severity(&self) -> Severity {
        Severity::parse(self.severity.as_deref())
    }

    /// 状态缺失或为空时视为 "open"
    pub fn status(&self) -> &str {
        match self.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s,
            _ => STATUS_OPEN,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status() == STATUS_OPEN
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        !self.user_id.is_empty() && self.user_id == user_id
    }

    pub fn author(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Unknown User")
    }

    /// 附件数量标签，例如 "1 attachment" / "3 attachments"；没有附件时返回 `None`
    pub fn attachment_label(&self) -> Option<String> {
        match self.attachments.len() {
            0 => None,
            1 => Some("1 attachment".to_string()),
            n => Some(format!("{} attachments", n)),
        }
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "user_id")]
    pub id: String,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
}

// =========================================================
// 请求对象 (Requests)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `GET /bugs` 的查询参数
///
/// 所有字段默认为 `None`，为 `None` 的字段不会出现在查询串中。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBugsParams {
    /// 按主题过滤
    pub topic: Option<String>,
    /// 全文搜索（标题、描述、主题）
    pub q: Option<String>,
    /// 返回条数上限，由后端决定默认值
    pub limit: Option<u32>,
}

impl ListBugsParams {
    pub fn search(q: Option<String>, limit: u32) -> Self {
        Self {
            topic: None,
            q,
            limit: Some(limit),
        }
    }

    /// 按 topic, q, limit 的固定顺序输出查询参数
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(topic) = &self.topic {
            pairs.push(("topic", topic.clone()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// `PUT /bugs/{id}` 的部分更新，只序列化设置了的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBugRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateBugRequest {
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeTarget {
    Bug,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleLikeRequest {
    pub target_type: LikeTarget,
    pub target_id: String,
}

impl ToggleLikeRequest {
    pub fn bug(bug_id: impl Into<String>) -> Self {
        Self {
            target_type: LikeTarget::Bug,
            target_id: bug_id.into(),
        }
    }
}

// =========================================================
// 响应对象 (Responses)
// =========================================================

/// 登录/注册响应，后端应当返回 token 与用户信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BugList {
    #[serde(default, deserialize_with = "nullable")]
    pub bugs: Vec<Bug>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BugEnvelope {
    #[serde(default)]
    pub bug: Option<Bug>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentEnvelope {
    #[serde(default)]
    pub comment: Option<Comment>,
}

/// 只携带可选提示信息的通用响应（删除、点赞等）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
}

/// 后端错误响应体中的可读信息
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
