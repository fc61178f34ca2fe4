//! 严重程度与状态徽章
//!
//! 纯展示组件。未知的严重程度已经在 `Bug::severity` 中回退为 Medium，
//! 缺失的状态在 `Bug::status` 中回退为 "open"。

use bugboard_shared::{STATUS_OPEN, Severity};
use leptos::prelude::*;

pub fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "badge badge-outline bg-error text-white border-error",
        Severity::High => "badge badge-outline bg-warning text-white border-warning",
        Severity::Medium => "badge badge-outline bg-yellow-300 text-black border-yellow-300",
        Severity::Low => "badge badge-outline bg-info text-white border-info",
    }
}

pub fn status_class(status: &str) -> &'static str {
    if status == STATUS_OPEN {
        "text-xs px-2 py-1 rounded-full bg-green-100 text-green-800"
    } else {
        "text-xs px-2 py-1 rounded-full bg-gray-100 text-gray-800"
    }
}

#[component]
pub fn SeverityBadge(severity: Severity) -> impl IntoView {
    view! { <span class=severity_class(severity)>{severity.label()}</span> }
}

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    view! { <span class=status_class(&status)>{status.clone()}</span> }
}

#[component]
pub fn TopicBadge(#[prop(into)] topic: String) -> impl IntoView {
    (!topic.trim().is_empty()).then(|| {
        view! {
            <span class="text-xs px-2 py-1 rounded-full bg-base-200 text-base-content/70">
                {topic}
            </span>
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugboard_shared::Bug;

    fn bug(extra: &str) -> Bug {
        serde_json::from_str(&format!(r#"{{"bug_id":"b1","title":"t"{}}}"#, extra)).unwrap()
    }

    #[test]
    fn test_missing_status_renders_open_style() {
        let b = bug("");
        assert_eq!(b.status(), "open");
        assert_eq!(status_class(b.status()), status_class(STATUS_OPEN));
    }

    #[test]
    fn test_other_status_uses_neutral_style() {
        let b = bug(r#","status":"closed""#);
        assert_ne!(status_class(b.status()), status_class(STATUS_OPEN));
    }

    #[test]
    fn test_unknown_severity_uses_medium_style() {
        for raw in [r#","severity":"urgent""#, r#","severity":null"#, ""] {
            let b = bug(raw);
            assert_eq!(severity_class(b.severity()), severity_class(Severity::Medium));
            assert_eq!(b.severity().label(), "Medium");
        }
    }
}
