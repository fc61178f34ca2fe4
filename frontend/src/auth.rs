//! 认证模块
//!
//! 管理用户会话（用户信息 + Bearer Token），与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 持久化顺序保证：先写 Token 再写用户信息，清除时两者一起删除。
//! 因此只要内存中存在用户，LocalStorage 中就一定有 Token。

use bugboard_shared::{AuthResponse, User};
use leptos::prelude::*;

use crate::api::{self, ApiClient, STORAGE_TOKEN_KEY, Transport};
use crate::error::{ApiError, ApiResult};
use crate::web::{BrowserStorage, KeyValueStore};

/// 用户信息在 LocalStorage 中的键
pub const STORAGE_USER_KEY: &str = "user";

/// 已认证的会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl TryFrom<AuthResponse> for Session {
    type Error = ApiError;

    fn try_from(resp: AuthResponse) -> Result<Self, Self::Error> {
        let token = resp
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::Incomplete("token"))?;
        let user = resp.user.ok_or(ApiError::Incomplete("user"))?;
        Ok(Session { user, token })
    }
}

// =========================================================
// 会话持久化
// =========================================================

/// 从存储恢复会话；Token 与用户信息不成对时视为无会话并清理残留
pub fn restore_session<S: KeyValueStore>(store: &S) -> Option<Session> {
    let token = store.get(STORAGE_TOKEN_KEY).filter(|t| !t.trim().is_empty());
    let user = store
        .get(STORAGE_USER_KEY)
        .and_then(|raw| serde_json::from_str::<User>(&raw).ok());

    match (token, user) {
        (Some(token), Some(user)) => Some(Session { user, token }),
        (None, None) => None,
        _ => {
            log::warn!("[Auth] Incomplete persisted session, clearing");
            clear_session(store);
            None
        }
    }
}

/// 持久化会话，Token 写入失败时不会写用户信息
pub fn persist_session<S: KeyValueStore>(store: &S, session: &Session) -> bool {
    if !store.set(STORAGE_TOKEN_KEY, &session.token) {
        return false;
    }
    match serde_json::to_string(&session.user) {
        Ok(raw) => store.set(STORAGE_USER_KEY, &raw),
        Err(e) => {
            log::error!("[Auth] Failed to serialize user: {}", e);
            false
        }
    }
}

pub fn clear_session<S: KeyValueStore>(store: &S) {
    store.delete(STORAGE_USER_KEY);
    store.delete(STORAGE_TOKEN_KEY);
}

/// 调用登录接口并持久化会话
pub async fn sign_in<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> ApiResult<Session> {
    let resp = api::auth::login(api, email, password).await?;
    let session = Session::try_from(resp)?;
    persist_session(api.store(), &session);
    Ok(session)
}

/// 调用注册接口；后端直接返回 Token 时同时建立会话
pub async fn sign_up<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    name: &str,
    email: &str,
    password: &str,
) -> ApiResult<Option<Session>> {
    let resp = api::auth::signup(api, name, email, password).await?;
    match Session::try_from(resp) {
        Ok(session) => {
            persist_session(api.store(), &session);
            Ok(Some(session))
        }
        Err(_) => Ok(None),
    }
}

// =========================================================
// 认证上下文
// =========================================================

/// 认证状态
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    /// 当前会话
    pub session: Option<Session>,
    /// 是否正在从存储恢复
    pub is_loading: bool,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
/// 写入只经过 `restore`、`establish`、`logout` 三个入口。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            session: None,
            is_loading: true,
        });
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::is_authenticated))
    }

    /// 当前用户（响应式）
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    /// 从 LocalStorage 初始化认证状态
    pub fn restore(&self) {
        let session = restore_session(&BrowserStorage);
        if let Some(session) = &session {
            log::info!("[Auth] Restored session for {}", session.user.email);
        }
        self.set_state.set(AuthState {
            session,
            is_loading: false,
        });
    }

    /// 登录成功后写入内存状态（调用前会话已经持久化）
    pub fn establish(&self, session: Session) {
        log::info!("[Auth] Signed in as {}", session.user.email);
        self.set_state.update(|state| {
            state.session = Some(session);
            state.is_loading = false;
        });
    }

    /// 注销并清除状态
    ///
    /// 导航将由路由服务的认证状态监听自动处理。
    pub fn logout(&self) {
        clear_session(&BrowserStorage);
        self.set_state.update(|state| state.session = None);
        log::info!("[Auth] Signed out");
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
