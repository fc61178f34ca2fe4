//! Bug Tracker 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `api`: 后端 REST 客户端
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

pub mod api;
mod auth;
mod config;
mod error;
mod components {
    pub mod badge;
    pub mod bug_detail;
    pub mod create_bug;
    pub mod dashboard;
    pub mod icons;
    pub mod layout;
    pub mod login;
    pub mod not_found;
    pub mod signup;
    pub mod toast;
}

use crate::api::ApiClient;
use crate::auth::AuthContext;
use crate::components::bug_detail::BugDetailPage;
use crate::components::create_bug::CreateBugPage;
use crate::components::dashboard::DashboardPage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::not_found::NotFoundPage;
use crate::components::signup::SignupPage;
use crate::components::toast::{ToastHost, provide_toaster};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod download;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;
    pub mod task;

    pub use download::download;
    pub use http::FetchTransport;
    #[cfg(test)]
    pub use storage::MemoryStore;
    pub use storage::{BrowserStorage, KeyValueStore};
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。受保护页面包在 Layout 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Signup => view! { <SignupPage /> }.into_any(),
        AppRoute::Dashboard => view! { <Layout><DashboardPage /></Layout> }.into_any(),
        AppRoute::CreateBug => view! { <Layout><CreateBugPage /></Layout> }.into_any(),
        AppRoute::BugDetail(id) => view! { <Layout><BugDetailPage bug_id=id /></Layout> }.into_any(),
        AppRoute::NotFound(path) => view! { <Layout><NotFoundPage path=path /></Layout> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 提示服务
    provide_toaster();

    // 2. 创建认证上下文，并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    auth_ctx.restore();

    // 3. API 客户端：每次请求时读取 Token 和后端地址，因此整个应用共享一个即可
    provide_context(ApiClient::browser());

    // 4. 获取认证状态信号，用于注入路由服务（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 5. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
