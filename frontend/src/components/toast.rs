//! 通知提示
//!
//! 全局的提示队列放在根组件的 Context 中，页面跳转后提示依然可见
//! （例如提交报告成功后跳转到列表页）。每条提示在若干秒后自动消失。

use std::time::Duration;

use leptos::prelude::*;

const AUTO_DISMISS: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "alert alert-success shadow-lg",
            ToastKind::Error => "alert alert-error shadow-lg",
            ToastKind::Info => "alert alert-info shadow-lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

/// 提示队列，超过上限时丢弃最旧的一条
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, title: &str, description: &str) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            kind,
            title: title.to_string(),
            description: description.to_string(),
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// 提示服务
#[derive(Clone, Copy)]
pub struct Toaster {
    queue: RwSignal<ToastQueue>,
}

impl Toaster {
    fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    pub fn show(&self, kind: ToastKind, title: &str, description: &str) {
        let mut id = 0;
        self.queue
            .update(|q| id = q.push(kind, title, description));

        let queue = self.queue;
        set_timeout(
            move || {
                let _ = queue.try_update(|q| q.dismiss(id));
            },
            AUTO_DISMISS,
        );
    }

    pub fn success(&self, title: &str, description: &str) {
        self.show(ToastKind::Success, title, description);
    }

    pub fn error(&self, description: &str) {
        log::warn!("[Toast] {}", description);
        self.show(ToastKind::Error, "Error", description);
    }

    pub fn info(&self, title: &str, description: &str) {
        self.show(ToastKind::Info, title, description);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

pub fn provide_toaster() -> Toaster {
    let toaster = Toaster::new();
    provide_context(toaster);
    toaster
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

/// 提示框容器，挂在根组件中
#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toaster.queue.with(|q| q.items().to_vec())
                key=|t| t.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.alert_class() on:click=move |_| toaster.dismiss(id)>
                            <div>
                                <h3 class="font-bold">{toast.title}</h3>
                                <div class="text-sm">{toast.description}</div>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Success, "Success!", "saved");
        let b = queue.push(ToastKind::Error, "Error", "failed");
        assert_ne!(a, b);
        assert_eq!(queue.items().len(), 2);

        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].id, b);

        // 已经消失的提示再次 dismiss 不会出错
        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
    }

    #[test]
    fn test_oldest_dropped_when_full() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Info, "1", "");
        for i in 2..=4 {
            queue.push(ToastKind::Info, &i.to_string(), "");
        }
        assert_eq!(queue.items().len(), MAX_VISIBLE);
        assert!(queue.items().iter().all(|t| t.id != first));
        assert_eq!(queue.items()[0].title, "2");
    }

    #[test]
    fn test_info_toast_has_own_style() {
        let mut queue = ToastQueue::default();
        queue.push(ToastKind::Info, "Connected", "Server status: ok");
        let toast = &queue.items()[0];
        assert_eq!(toast.kind, ToastKind::Info);
        assert_eq!(toast.kind.alert_class(), "alert alert-info shadow-lg");
        assert_ne!(ToastKind::Info.alert_class(), ToastKind::Success.alert_class());
    }
}
