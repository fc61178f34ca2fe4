mod like;

use bugboard_shared::date::{format_date, format_date_numeric};
use bugboard_shared::{Bug, Comment, STATUS_CLOSED, STATUS_OPEN, UpdateBugRequest};
use leptos::prelude::*;

use crate::api::{self, use_api};
use crate::auth::use_auth;
use crate::components::badge::{SeverityBadge, StatusBadge, TopicBadge};
use crate::components::icons::{Calendar, Download, Heart, MessageCircle, Trash2, UserIcon};
use crate::components::toast::use_toaster;
use crate::web::download;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use crate::web::task::spawn_bound;

pub use like::{LikeFlag, like_and_refresh};

/// 关闭/重新打开：open -> closed，其余状态 -> open
pub fn next_status(bug: &Bug) -> &'static str {
    if bug.is_open() { STATUS_CLOSED } else { STATUS_OPEN }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    let date = comment.created_at.as_deref().map(format_date);
    view! {
        <li class="border-l-2 border-base-300 pl-4 py-1">
            <div class="flex items-center gap-2 text-sm">
                <span class="font-medium">{comment.author().to_string()}</span>
                {date.map(|d| view! { <span class="text-xs text-base-content/50">{d}</span> })}
            </div>
            <p class="text-sm text-base-content/80 whitespace-pre-wrap">{comment.text}</p>
        </li>
    }
}

#[component]
pub fn BugDetailPage(#[prop(into)] bug_id: String) -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let toaster = use_toaster();
    let router = use_router();

    let bug = RwSignal::new(Option::<Bug>::None);
    let (is_loading, set_is_loading) = signal(true);
    let like = RwSignal::new(LikeFlag::default());
    let (is_busy, set_is_busy) = signal(false);
    let bug_id = StoredValue::new(bug_id);

    // 初始加载
    {
        let api = api.clone();
        spawn_bound(async move {
            match api::bugs::get(&api, &bug_id.get_value()).await {
                Ok(envelope) => bug.set(envelope.bug),
                Err(e) => {
                    toaster.error(&e.message_or("Failed to load bug details"));
                    bug.set(None);
                }
            }
            set_is_loading.set(false);
        });
    }

    let is_owner = move || {
        let user = auth.user();
        bug.with(|b| match (b, user) {
            (Some(b), Some(u)) => b.is_owned_by(&u.id),
            _ => false,
        })
    };

    let on_like = {
        let api = api.clone();
        move |_: leptos::ev::MouseEvent| {
            let mut previous = None;
            like.update(|flag| previous = flag.begin());
            let Some(previous) = previous else {
                return;
            };

            let api = api.clone();
            spawn_bound(async move {
                let (toggled, refreshed) = like_and_refresh(&api, &bug_id.get_value()).await;
                if let Err(e) = &toggled {
                    toaster.error(&e.message_or("Failed to update like"));
                }
                like.update(|flag| flag.settle(previous, toggled.is_ok()));
                match refreshed {
                    Ok(envelope) => {
                        if let Some(fresh) = envelope.bug {
                            bug.set(Some(fresh));
                        }
                    }
                    Err(e) => log::warn!("[BugDetail] refresh after like failed: {}", e),
                }
            });
        }
    };

    let on_toggle_status = {
        let api = api.clone();
        move |_: leptos::ev::MouseEvent| {
            let Some(status) = bug.with_untracked(|b| b.as_ref().map(next_status)) else {
                return;
            };
            set_is_busy.set(true);
            let api = api.clone();
            spawn_bound(async move {
                let changes = UpdateBugRequest::status(status);
                match api::bugs::update(&api, &bug_id.get_value(), &changes).await {
                    Ok(envelope) => {
                        match envelope.bug {
                            Some(fresh) => bug.set(Some(fresh)),
                            None => bug.update(|b| {
                                if let Some(b) = b {
                                    b.status = Some(status.to_string());
                                }
                            }),
                        }
                        let title = if status == STATUS_CLOSED { "Bug closed" } else { "Bug reopened" };
                        toaster.success(title, "Status updated successfully.");
                    }
                    Err(e) => toaster.error(&e.message_or("Failed to update bug")),
                }
                set_is_busy.set(false);
            });
        }
    };

    let on_delete = move |_: leptos::ev::MouseEvent| {
        if !confirm("Delete this bug report? This cannot be undone.") {
            return;
        }
        set_is_busy.set(true);
        let api = api.clone();
        spawn_bound(async move {
            match api::bugs::delete(&api, &bug_id.get_value()).await {
                Ok(_) => {
                    toaster.success("Deleted", "Bug report deleted.");
                    router.go(AppRoute::Dashboard);
                }
                Err(e) => {
                    toaster.error(&e.message_or("Failed to delete bug"));
                    set_is_busy.set(false);
                }
            }
        });
    };

    let not_found = || {
        view! {
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body items-center text-center py-16">
                    <h2 class="text-xl font-semibold">"Bug not found"</h2>
                    <Link to="/dashboard" class="btn btn-ghost btn-sm mt-2">"Back to Dashboard"</Link>
                </div>
            </div>
        }
    };

    let details = move || bug.get().map(|b| {
        let on_like = on_like.clone();
        let on_toggle_status = on_toggle_status.clone();
        let on_delete = on_delete.clone();
        let attachments = b.attachments.clone();
        let comments = b.comments().to_vec();
        view! {
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body gap-4">
                    <div class="flex flex-wrap items-center gap-2">
                        <SeverityBadge severity=b.severity() />
                        <StatusBadge status=b.status().to_string() />
                        <TopicBadge topic=b.topic.clone() />
                    </div>
                    <h1 class="text-2xl font-bold">{b.title.clone()}</h1>
                    <div class="flex flex-wrap items-center gap-4 text-sm text-base-content/60">
                        <span class="flex items-center gap-1">
                            <UserIcon attr:class="h-4 w-4" />
                            {b.author().to_string()}
                        </span>
                        <span class="flex items-center gap-1">
                            <Calendar attr:class="h-4 w-4" />
                            {format_date_numeric(&b.created_at)}
                        </span>
                    </div>
                    <p class="whitespace-pre-wrap">{b.description.clone()}</p>

                    <div class="flex flex-wrap items-center gap-2 pt-2">
                        <button
                            class=move || if like.with(LikeFlag::is_liked) {
                                "btn btn-sm gap-2 btn-error text-white"
                            } else {
                                "btn btn-sm gap-2 btn-outline"
                            }
                            disabled=move || like.with(LikeFlag::is_pending)
                            on:click=on_like.clone()
                        >
                            <Heart attr:class="h-4 w-4" />
                            {b.likes_count}
                        </button>

                        <Show when=is_owner>
                            <button
                                class="btn btn-sm btn-outline"
                                disabled=move || is_busy.get()
                                on:click=on_toggle_status.clone()
                            >
                                {move || if bug.with(|b| b.as_ref().is_some_and(Bug::is_open)) {
                                    "Close Bug"
                                } else {
                                    "Reopen Bug"
                                }}
                            </button>
                            <button
                                class="btn btn-sm btn-outline btn-error gap-2"
                                disabled=move || is_busy.get()
                                on:click=on_delete.clone()
                            >
                                <Trash2 attr:class="h-4 w-4" />
                                "Delete"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>

            {(!attachments.is_empty()).then(|| view! {
                <div class="card bg-base-100 shadow-sm">
                    <div class="card-body">
                        <h2 class="card-title text-lg">"Attachments"</h2>
                        <ul class="space-y-2">
                            {attachments.into_iter().map(|a| {
                                let label = a.filename.clone();
                                let on_download = move |_| {
                                    if let Err(e) = download(&a.url, &a.filename) {
                                        log::error!("[BugDetail] download failed: {:?}", e);
                                        toaster.error("Failed to download attachment");
                                    }
                                };
                                view! {
                                    <li class="flex items-center justify-between bg-base-200 rounded-lg px-3 py-2 text-sm">
                                        <span class="truncate">{label}</span>
                                        <button class="btn btn-ghost btn-xs gap-1" on:click=on_download>
                                            <Download attr:class="h-4 w-4" />
                                            "Download"
                                        </button>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                </div>
            })}

            {(!comments.is_empty()).then(|| view! {
                <div class="card bg-base-100 shadow-sm">
                    <div class="card-body">
                        <h2 class="card-title text-lg gap-2">
                            <MessageCircle attr:class="h-5 w-5" />
                            {format!("Comments ({})", comments.len())}
                        </h2>
                        <ul class="space-y-3">
                            {comments.into_iter().map(|c| view! { <CommentItem comment=c /> }).collect_view()}
                        </ul>
                    </div>
                </div>
            })}
        }
    });

    view! {
        <div class="max-w-4xl mx-auto p-4 md:p-8 space-y-6">
            <Link to="/dashboard" class="link link-hover text-sm text-base-content/60">
                "← Back to Dashboard"
            </Link>

            {move || match (is_loading.get(), bug.with(Option::is_some)) {
                (true, _) => view! {
                    <div class="flex justify-center p-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
                .into_any(),
                (false, false) => not_found().into_any(),
                (false, true) => details().into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiClient, Body};
    use crate::config::STORAGE_BASE_URL_KEY;
    use crate::web::MemoryStore;
    use bugboard_shared::protocol::HttpMethod;
    use serde_json::json;

    fn bug(status: Option<&str>) -> Bug {
        serde_json::from_value(json!({ "bug_id": "b1", "title": "t", "status": status })).unwrap()
    }

    #[test]
    fn test_next_status() {
        assert_eq!(next_status(&bug(Some("open"))), STATUS_CLOSED);
        assert_eq!(next_status(&bug(None)), STATUS_CLOSED);
        assert_eq!(next_status(&bug(Some("closed"))), STATUS_OPEN);
        assert_eq!(next_status(&bug(Some("in-progress"))), STATUS_OPEN);
    }

    #[tokio::test]
    async fn test_close_sends_only_status() {
        let store = MemoryStore::with(&[(STORAGE_BASE_URL_KEY, "http://api.test")]);
        let api = ApiClient::new(MockTransport::new(), store);
        api.transport().mock_response(
            HttpMethod::Put,
            "http://api.test/bugs/b1",
            200,
            json!({ "bug": { "bug_id": "b1", "title": "t", "status": "closed" } }),
        );

        let changes = UpdateBugRequest::status(next_status(&bug(None)));
        let updated = api::bugs::update(&api, "b1", &changes).await.unwrap();
        assert!(!updated.bug.unwrap().is_open());

        let reqs = api.transport().requests();
        let Body::Json(body) = &reqs[0].body else {
            panic!("expected json body");
        };
        assert_eq!(body, r#"{"status":"closed"}"#);
    }
}
