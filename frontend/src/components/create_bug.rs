mod form_state;

use bugboard_shared::{BugEnvelope, Severity};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::{self, ApiClient, Transport, use_api};
use crate::components::icons::{Upload, X};
use crate::components::toast::use_toaster;
use crate::web::KeyValueStore;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use crate::web::task::spawn_bound;

pub use form_state::{BugDraft, format_size_mb};

const SUBMIT_FAILED: &str = "Failed to submit bug report";

/// 校验并提交表单，失败时返回可直接展示的错误信息
pub async fn submit_report<T: Transport, S: KeyValueStore>(
    api: &ApiClient<T, S>,
    draft: &BugDraft<T::Upload>,
) -> Result<BugEnvelope, String> {
    let form = draft.to_multipart().map_err(|e| e.to_string())?;
    api::bugs::create(api, form)
        .await
        .map_err(|e| e.message_or(SUBMIT_FAILED))
}

/// 从 `<input type="file" multiple>` 中取出本次选择的文件
fn picked_files(ev: &leptos::ev::Event) -> Vec<web_sys::File> {
    let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let files = input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default();
    // 清空 input，允许再次选择同一个文件
    input.set_value("");
    files
}

#[component]
pub fn CreateBugPage() -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();
    let router = use_router();

    // web_sys::File 不是 Send，只能放在本地信号里
    let draft = RwSignal::new_local(BugDraft::<web_sys::File>::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        let snapshot = draft.get_untracked();
        if let Err(e) = snapshot.validate() {
            toaster.error(&e.to_string());
            return;
        }

        set_is_submitting.set(true);
        let api = api.clone();
        spawn_bound(async move {
            match submit_report(&api, &snapshot).await {
                Ok(_) => {
                    toaster.success("Success!", "Bug report submitted successfully.");
                    router.go(AppRoute::Dashboard);
                }
                Err(message) => {
                    toaster.error(&message);
                    set_is_submitting.set(false);
                }
            }
        });
    };

    let on_files = move |ev: leptos::ev::Event| {
        let files = picked_files(&ev);
        if !files.is_empty() {
            draft.update(|d| d.add_files(files));
        }
    };

    let on_cancel = move |_| router.go(AppRoute::Dashboard);

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-sm">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <div>
                        <h1 class="card-title text-2xl">"Report a Bug"</h1>
                        <p class="text-sm text-base-content/60">
                            "Describe the problem so the team can reproduce it."
                        </p>
                    </div>

                    <div class="form-control">
                        <label class="label" for="title">
                            <span class="label-text">"Title *"</span>
                        </label>
                        <input
                            id="title"
                            type="text"
                            class="input input-bordered w-full"
                            placeholder="Brief description of the bug"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="description">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea
                            id="description"
                            class="textarea textarea-bordered w-full min-h-32"
                            placeholder="Steps to reproduce, expected and actual behavior"
                            prop:value=move || draft.with(|d| d.description.clone())
                            on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                        ></textarea>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label" for="topic">
                                <span class="label-text">"Topic"</span>
                            </label>
                            <input
                                id="topic"
                                type="text"
                                class="input input-bordered w-full"
                                placeholder="e.g. Authentication, UI"
                                prop:value=move || draft.with(|d| d.topic.clone())
                                on:input=move |ev| draft.update(|d| d.topic = event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="severity">
                                <span class="label-text">"Severity"</span>
                            </label>
                            <select
                                id="severity"
                                class="select select-bordered w-full"
                                prop:value=move || draft.with(|d| d.severity.as_str())
                                on:change=move |ev| {
                                    let severity = Severity::parse(Some(&event_target_value(&ev)));
                                    draft.update(|d| d.severity = severity);
                                }
                            >
                                {Severity::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>

                    <div class="form-control">
                        <span class="label-text mb-2">"Attachments"</span>
                        <label class="flex flex-col items-center justify-center gap-2 border-2 border-dashed border-base-300 rounded-box p-6 cursor-pointer hover:bg-base-200">
                            <Upload attr:class="h-8 w-8 text-base-content/40" />
                            <span class="text-sm">"Click to upload files"</span>
                            <span class="text-xs text-base-content/50">"PDF, PNG, JPG, GIF up to 10MB"</span>
                            <input
                                type="file"
                                multiple
                                class="hidden"
                                accept=".pdf,.png,.jpg,.jpeg,.gif"
                                on:change=on_files
                            />
                        </label>
                        <ul class="mt-3 space-y-2">
                            {move || {
                                draft.with(|d| {
                                    d.files()
                                        .iter()
                                        .enumerate()
                                        .map(|(index, file)| {
                                            let name = file.name();
                                            let size = format_size_mb(file.size());
                                            view! {
                                                <li class="flex items-center justify-between bg-base-200 rounded-lg px-3 py-2 text-sm">
                                                    <span class="truncate">{name}</span>
                                                    <div class="flex items-center gap-3 shrink-0">
                                                        <span class="text-base-content/60">{size}</span>
                                                        <button
                                                            type="button"
                                                            class="btn btn-ghost btn-xs btn-square"
                                                            on:click=move |_| {
                                                                draft.update(|d| {
                                                                    d.remove_file(index);
                                                                });
                                                            }
                                                        >
                                                            <X attr:class="h-4 w-4" />
                                                        </button>
                                                    </div>
                                                </li>
                                            }
                                        })
                                        .collect_view()
                                })
                            }}
                        </ul>
                    </div>

                    <div class="card-actions justify-end pt-2">
                        <button type="button" class="btn btn-ghost" on:click=on_cancel>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                            } else {
                                "Submit Bug Report".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::form_state::{ATTACHMENTS_FIELD, DraftError};
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{Body, Part};
    use crate::config::STORAGE_BASE_URL_KEY;
    use crate::web::MemoryStore;
    use bugboard_shared::protocol::HttpMethod;
    use serde_json::json;

    fn create_client() -> ApiClient<MockTransport, MemoryStore> {
        let store = MemoryStore::with(&[(STORAGE_BASE_URL_KEY, "http://api.test")]);
        ApiClient::new(MockTransport::new(), store)
    }

    #[tokio::test]
    async fn test_submit_title_only() {
        let api = create_client();
        api.transport().mock_response(
            HttpMethod::Post,
            "http://api.test/bugs",
            201,
            json!({ "bug": { "bug_id": "b9", "title": "Crash" } }),
        );

        let mut draft = BugDraft::new();
        draft.title = "Crash".to_string();
        let created = submit_report(&api, &draft).await.unwrap();
        assert_eq!(created.bug.unwrap().bug_id, "b9");

        let reqs = api.transport().requests();
        assert_eq!(reqs.len(), 1);
        let Body::Multipart(form) = &reqs[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.text_value("description"), Some(""));
        assert_eq!(form.text_value("topic"), Some(""));
        assert_eq!(form.text_value("severity"), Some("medium"));
    }

    #[tokio::test]
    async fn test_submit_sends_remaining_files() {
        let api = create_client();
        api.transport()
            .mock_response(HttpMethod::Post, "http://api.test/bugs", 201, json!({ "bug": null }));

        let mut draft = BugDraft::new();
        draft.title = "Broken upload".to_string();
        draft.add_files(["one.png".to_string(), "two.pdf".to_string()]);
        draft.remove_file(0);

        submit_report(&api, &draft).await.unwrap();

        let reqs = api.transport().requests();
        let Body::Multipart(form) = &reqs[0].body else {
            panic!("expected multipart body");
        };
        let files: Vec<_> = form
            .parts()
            .iter()
            .filter_map(|p| match p {
                Part::File { name, file } => Some((name.as_str(), file.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(files, [(ATTACHMENTS_FIELD, "two.pdf")]);
    }

    #[tokio::test]
    async fn test_submit_failure_messages() {
        let api = create_client();
        api.transport().mock_response(
            HttpMethod::Post,
            "http://api.test/bugs",
            400,
            json!({ "message": "Title too long" }),
        );
        api.transport()
            .mock_empty(HttpMethod::Post, "http://api.test/bugs", 500);

        let mut draft = BugDraft::new();
        draft.title = "x".to_string();
        assert_eq!(submit_report(&api, &draft).await.unwrap_err(), "Title too long");
        assert_eq!(submit_report(&api, &draft).await.unwrap_err(), SUBMIT_FAILED);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_sent() {
        let api = create_client();
        let draft = BugDraft::<String>::new();

        let err = submit_report(&api, &draft).await.unwrap_err();
        assert_eq!(err, DraftError::MissingTitle.to_string());
        assert_eq!(api.transport().request_count(), 0);
    }
}
