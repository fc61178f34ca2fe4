//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、守卫规则以及路径解析。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 注册页面
    Signup,
    /// 缺陷列表 (需要认证，`/` 也会落到这里)
    Dashboard,
    /// 新建缺陷报告 (需要认证)
    CreateBug,
    /// 缺陷详情 (需要认证)
    BugDetail(String),
    /// 页面未找到，保留原始路径 (需要认证)
    NotFound(String),
}

impl Default for AppRoute {
    fn default() -> Self {
        Self::Dashboard
    }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match trimmed {
            "" | "/" | "/dashboard" => Self::Dashboard,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            "/create" => Self::CreateBug,
            _ => match trimmed.strip_prefix("/bug/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    let id = urlencoding::decode(id)
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| id.to_string());
                    Self::BugDetail(id)
                }
                _ => Self::NotFound(path.to_string()),
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::CreateBug => "/create".to_string(),
            Self::BugDetail(id) => format!("/bug/{}", urlencoding::encode(id)),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    ///
    /// 除登录和注册外的所有页面（包括 404）都在守卫之内。
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::Signup)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 对目标路由执行守卫，返回最终应当展示的路由
    pub fn resolve(self, is_authenticated: bool) -> Resolution {
        if self.requires_auth() && !is_authenticated {
            Resolution::Redirect(Self::auth_failure_redirect())
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Resolution::Redirect(Self::auth_success_redirect())
        } else {
            Resolution::Allow(self)
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 放行到目标路由
    Allow(AppRoute),
    /// 被重定向到另一个路由
    Redirect(AppRoute),
}

impl Resolution {
    pub fn route(&self) -> &AppRoute {
        match self {
            Resolution::Allow(r) | Resolution::Redirect(r) => r,
        }
    }

    pub fn into_route(self) -> AppRoute {
        match self {
            Resolution::Allow(r) | Resolution::Redirect(r) => r,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Resolution::Redirect(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/dashboard/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/signup"), AppRoute::Signup);
        assert_eq!(AppRoute::from_path("/create?x=1"), AppRoute::CreateBug);
        assert_eq!(
            AppRoute::from_path("/bug/b1"),
            AppRoute::BugDetail("b1".to_string())
        );
        assert_eq!(
            AppRoute::from_path("/bug/a%20b"),
            AppRoute::BugDetail("a b".to_string())
        );
        assert_eq!(
            AppRoute::from_path("/bug/"),
            AppRoute::NotFound("/bug/".to_string())
        );
        assert_eq!(
            AppRoute::from_path("/settings"),
            AppRoute::NotFound("/settings".to_string())
        );
    }

    #[test]
    fn test_detail_path_round_trips_id() {
        let route = AppRoute::BugDetail("x/y".to_string());
        assert_eq!(route.to_path(), "/bug/x%2Fy");
        assert_eq!(AppRoute::from_path(&route.to_path()), route);
    }

    #[test]
    fn test_logged_out_protected_paths_redirect_to_login() {
        for path in ["/", "/dashboard", "/create", "/bug/b1", "/nope"] {
            let resolution = AppRoute::from_path(path).resolve(false);
            assert_eq!(
                resolution,
                Resolution::Redirect(AppRoute::Login),
                "path {path}"
            );
            assert_eq!(resolution.route().to_path(), "/login");
        }
    }

    #[test]
    fn test_logged_out_public_paths_allowed() {
        assert_eq!(
            AppRoute::Login.resolve(false),
            Resolution::Allow(AppRoute::Login)
        );
        assert_eq!(
            AppRoute::Signup.resolve(false),
            Resolution::Allow(AppRoute::Signup)
        );
    }

    #[test]
    fn test_logged_in_skips_auth_pages() {
        assert_eq!(
            AppRoute::Login.resolve(true),
            Resolution::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(
            AppRoute::Signup.resolve(true),
            Resolution::Redirect(AppRoute::Dashboard)
        );
        let detail = AppRoute::BugDetail("b1".into());
        assert_eq!(detail.clone().resolve(true), Resolution::Allow(detail));
    }
}
