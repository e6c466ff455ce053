use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::SiteError;

/// 尾沿防抖：每次调用都会取消尚未触发的上一次调用并重新计时，
/// 只有静默 `delay` 之后的最后一次调用会真正执行。
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// 锁被毒化时沿用其中的状态，不丢弃已调度的调用
    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|e| {
            tracing::warn!("防抖状态锁已被毒化，继续使用原状态");
            PoisonError::into_inner(e)
        })
    }

    /// 调度一次调用。必须在 tokio 运行时内调用，否则返回错误且 `f` 不会执行。
    pub fn call<F>(&self, f: F) -> Result<(), SiteError>
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| SiteError::Internal(format!("防抖调用需要 tokio 运行时: {e}")))?;

        let delay = self.delay;
        let mut guard = self.pending();
        if let Some(prev) = guard.take() {
            prev.abort();
        }
        *guard = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
        Ok(())
    }

    /// 取消尚未触发的调用
    pub fn cancel(&self) {
        if let Some(prev) = self.pending().take() {
            prev.abort();
        }
    }

    /// 是否存在尚未触发的调用
    pub fn is_pending(&self) -> bool {
        self.pending().as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
