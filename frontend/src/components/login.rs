use leptos::prelude::*;

use crate::api::{self, use_api};
use crate::auth::{sign_in, use_auth};
use crate::components::icons::BugIcon;
use crate::components::toast::use_toaster;
use crate::config::AppConfig;
use crate::web::BrowserStorage;
use crate::web::router::Link;
use crate::web::task::spawn_bound;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let toaster = use_toaster();

    let (server, set_server) = signal(AppConfig::base_url(&BrowserStorage));
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (is_checking, set_is_checking) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if email.get().trim().is_empty() || password.get().is_empty() {
                set_error_msg.set(Some("Please fill in all fields".to_string()));
                return;
            }

            AppConfig::set_base_url(&BrowserStorage, &server.get());
            set_is_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            let email = email.get().trim().to_string();
            let password = password.get();
            spawn_bound(async move {
                match sign_in(&api, &email, &password).await {
                    // 路由服务监听认证状态，会自动跳转到列表页
                    Ok(session) => auth.establish(session),
                    Err(e) => {
                        log::warn!("[Login] {}", e);
                        set_error_msg.set(Some(e.message_or("Login failed. Check your credentials.")));
                    }
                }
                set_is_submitting.set(false);
            });
        }
    };

    let on_check = move |_| {
        AppConfig::set_base_url(&BrowserStorage, &server.get());
        set_is_checking.set(true);
        let api = api.clone();
        spawn_bound(async move {
            match api::system::health(&api).await {
                Ok(health) => toaster.info(
                    "Connected",
                    &format!("Server status: {}", health.status.as_deref().unwrap_or("ok")),
                ),
                Err(e) => toaster.error(&e.message_or("Server is unreachable")),
            }
            set_is_checking.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <BugIcon attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Bug Tracker"</h1>
                        <p class="text-base-content/70">"Sign in to continue"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="server">
                                <span class="label-text">"API server"</span>
                            </label>
                            <div class="join w-full">
                                <input
                                    id="server"
                                    type="url"
                                    on:input=move |ev| set_server.set(event_target_value(&ev))
                                    prop:value=server
                                    class="input input-bordered join-item w-full"
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    disabled=move || is_checking.get()
                                    on:click=on_check
                                >
                                    "Test connection"
                                </button>
                            </div>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <Link to="/signup" class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
