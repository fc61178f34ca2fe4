use bugboard_shared::date::format_date;
use bugboard_shared::{Bug, ListBugsParams};
use futures::future::AbortHandle;
use leptos::prelude::*;

use crate::api::{self, ApiClient, Transport, use_api};
use crate::components::badge::{SeverityBadge, StatusBadge, TopicBadge};
use crate::components::icons::{BugIcon, Calendar, Heart, Plus, Search};
use crate::components::toast::use_toaster;
use crate::error::ApiResult;
use crate::web::KeyValueStore;
use crate::web::router::Link;
use crate::web::task::{self, spawn_detached};

/// 列表页一次最多拉取的条数
pub const PAGE_LIMIT: u32 = 50;

const DESCRIPTION_PREVIEW: usize = 150;

/// 空结果提示：有搜索词时与完全没有数据时文案不同
pub fn empty_message(query: &str) -> &'static str {
    if query.trim().is_empty() {
        "No bugs reported yet."
    } else {
        "No bugs found matching your search."
    }
}

/// 按字符截断描述，超出部分以省略号结尾
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

/// 拉取列表；搜索词为空时不带 `q`
pub async fn fetch_bugs<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    query: &str,
) -> ApiResult<Vec<Bug>> {
    let q = Some(query.trim())
        .filter(|q| !q.is_empty())
        .map(str::to_string);
    let list = api::bugs::list(api, &ListBugsParams::search(q, PAGE_LIMIT)).await?;
    Ok(list.bugs)
}

#[component]
fn BugCard(bug: Bug) -> impl IntoView {
    let href = format!("/bug/{}", urlencoding::encode(&bug.bug_id));
    let description = preview(&bug.description, DESCRIPTION_PREVIEW);
    let attachments = bug.attachment_label();

    view! {
        <Link to=href class="card bg-base-100 shadow-sm hover:shadow-md transition-shadow">
            <div class="card-body p-5 gap-3">
                <div class="flex flex-wrap items-center gap-2">
                    <SeverityBadge severity=bug.severity() />
                    <StatusBadge status=bug.status().to_string() />
                    <TopicBadge topic=bug.topic.clone() />
                </div>
                <h2 class="card-title text-lg">{bug.title.clone()}</h2>
                <p class="text-sm text-base-content/70 line-clamp-3">{description}</p>
                <div class="flex flex-wrap items-center gap-4 text-xs text-base-content/60 pt-2">
                    <span class="flex items-center gap-1">
                        <Calendar attr:class="h-3.5 w-3.5" />
                        {format_date(&bug.created_at)}
                    </span>
                    <span class="flex items-center gap-1">
                        <Heart attr:class="h-3.5 w-3.5" />
                        {bug.likes_count}
                    </span>
                    {attachments.map(|label| view! { <span>{label}</span> })}
                </div>
            </div>
        </Link>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();

    let (bugs, set_bugs) = signal(Vec::<Bug>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (query, set_query) = signal(String::new());
    // 提交的搜索词，空结果文案以它为准而不是输入框的当前值
    let (searched, set_searched) = signal(String::new());
    let in_flight = StoredValue::new(Option::<AbortHandle>::None);

    let load = move |q: String| {
        set_is_loading.set(true);
        let api = api.clone();
        let handle = spawn_detached(async move {
            match fetch_bugs(&api, &q).await {
                Ok(list) => set_bugs.set(list),
                Err(e) => {
                    toaster.error(&e.message_or("Failed to load bugs"));
                    set_bugs.set(Vec::new());
                }
            }
            set_searched.set(q);
            set_is_loading.set(false);
        });
        // 新的搜索取消上一次尚未完成的请求
        in_flight.update_value(|slot| task::replace(slot, handle));
    };

    // 每次加载都会替换槽位中的任务，卸载时只需中止最后一个
    on_cleanup(move || {
        if let Some(handle) = in_flight.try_get_value().flatten() {
            handle.abort();
        }
    });

    // 初始加载
    load.clone()(String::new());

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        load(query.get_untracked());
    };

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Bug Reports"</h1>
                    <p class="text-base-content/60 mt-1">"Track and manage reported issues"</p>
                </div>
                <Link to="/create" class="btn btn-primary gap-2">
                    <Plus attr:class="h-4 w-4" />
                    "Report Bug"
                </Link>
            </div>

            <form class="join w-full" on:submit=on_search>
                <label class="input input-bordered join-item flex items-center gap-2 w-full">
                    <Search attr:class="h-4 w-4 opacity-60" />
                    <input
                        type="search"
                        class="grow"
                        placeholder="Search bugs by title, description or topic..."
                        prop:value=query
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" class="btn join-item">"Search"</button>
            </form>

            <Show
                when=move || !is_loading.get()
                fallback=|| view! {
                    <div class="flex justify-center p-12">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || bugs.with(|b| !b.is_empty())
                    fallback=move || view! {
                        <div class="card bg-base-100 shadow-sm">
                            <div class="card-body items-center text-center py-16">
                                <BugIcon attr:class="h-12 w-12 text-base-content/20" />
                                <p class="text-base-content/60">{move || searched.with(|q| empty_message(q))}</p>
                                <Link to="/create" class="btn btn-primary btn-sm mt-2">
                                    "Report the first bug"
                                </Link>
                            </div>
                        </div>
                    }
                >
                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                        <For
                            each=move || bugs.get()
                            key=|bug| bug.bug_id.clone()
                            children=|bug| view! { <BugCard bug=bug /> }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_empty_message() {
        assert_eq!(empty_message(""), "No bugs reported yet.");
        assert_eq!(empty_message("   "), "No bugs reported yet.");
        assert_eq!(empty_message("login"), "No bugs found matching your search.");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("exactly10!", 10), "exactly10!");
        assert_eq!(preview("hello world again", 11), "hello world...");
        // 按字符而不是字节截断
        assert_eq!(preview("缺陷报告很长", 4), "缺陷报告...");
    }

    #[tokio::test]
    async fn test_search_with_no_results() {
        let api = create_client();
        api.transport()
            .mock_response(HttpMethod::Get, "http://api.test/bugs", 200, json!({ "bugs": [] }));

        let bugs = fetch_bugs(&api, "login").await.unwrap();
        assert!(bugs.is_empty());
        assert_eq!(empty_message("login"), "No bugs found matching your search.");

        let reqs = api.transport().requests();
        assert_eq!(reqs[0].url, "http://api.test/bugs?q=login&limit=50");
    }

    #[tokio::test]
    async fn test_blank_query_is_omitted() {
        let api = create_client();
        api.transport().mock_response(
            HttpMethod::Get,
            "http://api.test/bugs",
            200,
            json!({ "bugs": [{ "bug_id": "b1", "title": "Crash" }] }),
        );

        let bugs = fetch_bugs(&api, "  ").await.unwrap();
        assert_eq!(bugs.len(), 1);
        assert_eq!(api.transport().requests()[0].url, "http://api.test/bugs?limit=50");
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let api = create_client();
        api.transport()
            .mock_empty(HttpMethod::Get, "http://api.test/bugs", 500);

        let err = fetch_bugs(&api, "").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.message_or("Failed to load bugs"), "Failed to load bugs");
    }
}
