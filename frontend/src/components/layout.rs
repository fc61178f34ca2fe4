use leptos::prelude::*;

use crate::auth::use_auth;
use crate::components::icons::{BugIcon, LogOut, Plus};
use crate::web::router::Link;

/// 受保护页面的外壳：顶部导航栏 + 内容区
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let auth = use_auth();

    // 注销后路由服务会监听认证状态并自动跳转到登录页
    let on_logout = move |_| auth.logout();

    view! {
        <div class="min-h-screen flex flex-col bg-base-200 font-sans">
            <header class="navbar bg-base-100 shadow-sm px-4">
                <div class="flex-1 gap-2">
                    <Link to="/dashboard" class="btn btn-ghost text-xl gap-2">
                        <BugIcon attr:class="h-6 w-6 text-primary" />
                        "Bug Tracker"
                    </Link>
                    <Link to="/create" class="btn btn-ghost btn-sm gap-1 hidden sm:inline-flex">
                        <Plus attr:class="h-4 w-4" />
                        "Report Bug"
                    </Link>
                </div>
                <div class="flex-none gap-4">
                    {move || auth.user().map(|user| view! {
                        <div class="hidden md:flex items-center gap-2 text-sm text-base-content/70">
                            "Welcome back, "
                            <span class="font-medium text-base-content">{user.name}</span>
                        </div>
                    })}
                    <button on:click=on_logout class="btn btn-ghost btn-sm gap-2">
                        <LogOut attr:class="h-4 w-4" />
                        <span class="hidden sm:inline">"Logout"</span>
                    </button>
                </div>
            </header>
            <main class="flex-1">{children()}</main>
        </div>
    }
}
