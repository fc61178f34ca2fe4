//! 组件绑定的异步任务
//!
//! 页面的数据加载都通过 `spawn_bound` 启动：任务被包装成可中止的 future，
//! 组件卸载时 `on_cleanup` 触发中止，之后任务不会再被轮询，
//! 因此不会在卸载后写入已销毁的信号。
//! 已经发出的 fetch 请求本身不会被取消，只是其结果被丢弃。

use std::future::Future;

use futures::FutureExt;
use futures::future::{AbortHandle, Abortable};
use leptos::prelude::on_cleanup;
use leptos::task::spawn_local;

/// 将 future 包装为可中止的任务，返回任务本体与中止句柄
pub fn bind<F>(fut: F) -> (impl Future<Output = bool>, AbortHandle)
where
    F: Future<Output = ()>,
{
    let (handle, registration) = AbortHandle::new_pair();
    let task = Abortable::new(fut, registration).map(|result| result.is_ok());
    (task, handle)
}

/// 启动一个与当前组件生命周期绑定的任务
///
/// 返回的句柄可以用来提前取消（例如发起新的搜索时取消上一次）。
pub fn spawn_bound<F>(fut: F) -> AbortHandle
where
    F: Future<Output = ()> + 'static,
{
    let (task, handle) = bind(fut);
    let on_unmount = handle.clone();
    on_cleanup(move || on_unmount.abort());
    spawn_local(async move {
        if !task.await {
            log::debug!("[Task] aborted before completion");
        }
    });
    handle
}

/// 用新任务替换槽位中的旧任务，旧任务被中止
///
/// 用于同一页面上会被反复触发的加载（如搜索），只保留最后一次。
pub fn replace(slot: &mut Option<AbortHandle>, handle: AbortHandle) {
    if let Some(prev) = slot.replace(handle) {
        prev.abort();
    }
}

/// 启动一个由调用方持有句柄的任务，不注册 `on_cleanup`
///
/// 反复触发的任务用这个版本，配合 [`replace`] 和组件上的一次性清理，
/// 避免每次触发都在 owner 上累积一个清理回调。
pub fn spawn_detached<F>(fut: F) -> AbortHandle
where
    F: Future<Output = ()> + 'static,
{
    let (task, handle) = bind(fut);
    spawn_local(async move {
        if !task.await {
            log::debug!("[Task] aborted before completion");
        }
    });
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_completed_task_reports_success() {
        let written = Rc::new(Cell::new(false));
        let flag = written.clone();
        let (task, _handle) = bind(async move { flag.set(true) });

        assert!(task.await);
        assert!(written.get());
    }

    #[tokio::test]
    async fn test_aborted_task_never_writes() {
        let written = Rc::new(Cell::new(false));
        let flag = written.clone();
        let (tx, rx) = oneshot::channel::<()>();

        let (task, handle) = bind(async move {
            // 模拟一个尚未返回的请求
            let _ = rx.await;
            flag.set(true);
        });

        handle.abort();
        let _ = tx.send(());

        assert!(!task.await);
        assert!(!written.get());
    }

    #[tokio::test]
    async fn test_replaced_task_never_writes() {
        let writes = Rc::new(Cell::new(0u32));
        let mut slot = None;

        let (tx_first, rx_first) = oneshot::channel::<()>();
        let first_writes = writes.clone();
        let (first, handle) = bind(async move {
            let _ = rx_first.await;
            first_writes.set(first_writes.get() + 1);
        });
        replace(&mut slot, handle);

        let second_writes = writes.clone();
        let (second, handle) = bind(async move {
            second_writes.set(second_writes.get() + 10);
        });
        replace(&mut slot, handle);

        let _ = tx_first.send(());
        assert!(!first.await);
        assert!(second.await);
        assert_eq!(writes.get(), 10);
        assert!(slot.is_some());
    }
}
