use leptos::prelude::*;

use crate::api::use_api;
use crate::auth::{sign_up, use_auth};
use crate::components::icons::BugIcon;
use crate::components::toast::use_toaster;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::task::spawn_bound;

/// 注册表单的本地校验
pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err("Please fill in all fields");
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let toaster = use_toaster();
    let router = use_router();

    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (name, email, password) = (name.get(), email.get(), password.get());
        if let Err(msg) = validate_signup(&name, &email, &password) {
            set_error_msg.set(Some(msg.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        let api = api.clone();
        spawn_bound(async move {
            match sign_up(&api, name.trim(), email.trim(), &password).await {
                Ok(Some(session)) => {
                    toaster.success("Welcome!", "Your account has been created.");
                    auth.establish(session);
                }
                Ok(None) => {
                    toaster.success("Account created", "Please sign in to continue.");
                    router.go(AppRoute::Login);
                }
                Err(e) => {
                    log::warn!("[Signup] {}", e);
                    set_error_msg.set(Some(e.message_or("Signup failed")));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="flex flex-col items-center gap-2 mb-4 text-center">
                    <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                        <BugIcon attr:class="h-8 w-8" />
                    </div>
                    <h1 class="text-3xl font-bold">"Create an account"</h1>
                    <p class="text-base-content/70">"Start reporting and tracking bugs"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="Jane Doe"
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                prop:value=name
                                class="input input-bordered"
                                required
                            />
                        </div>
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
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                } else {
                                    "Sign up".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to="/login" class="link link-primary">"Sign in"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_signup() {
        assert!(validate_signup("Ada", "ada@example.com", "secret").is_ok());
        assert_eq!(validate_signup(" ", "ada@example.com", "secret"), Err("Please fill in all fields"));
        assert_eq!(validate_signup("Ada", "ada@example.com", ""), Err("Please fill in all fields"));
        assert_eq!(
            validate_signup("Ada", "ada.example.com", "secret"),
            Err("Please enter a valid email address")
        );
    }
}
