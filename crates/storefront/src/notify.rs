//! Ephemeral toast notifications.
//!
//! Toasts are non-blocking user feedback: pushed on any user-facing event,
//! visible for 2.5 seconds, then gone. Ids come from a session counter, not
//! the wall clock, so rapid-fire pushes can never collide.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_millis(2500);

/// One visible message.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Default)]
struct TrayInner {
    next_id: u64,
    toasts: Vec<Toast>,
}

/// Shared tray of currently visible toasts.
///
/// Cheaply cloneable handle; expiry timers run as fire-and-forget tasks that
/// re-enter through their own clone. There is no cancellation API - a toast
/// removes itself and process shutdown drops whatever is pending.
#[derive(Debug, Clone, Default)]
pub struct ToastTray {
    inner: Arc<Mutex<TrayInner>>,
}

impl ToastTray {
    /// Create an empty tray.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TrayInner> {
        // A panicked expiry task must not take the tray down with it.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push a message, returning its id.
    ///
    /// Schedules automatic removal after [`TOAST_TTL`] when called inside a
    /// tokio runtime; outside one, expiry still happens lazily in
    /// [`visible`](Self::visible).
    pub fn push(&self, message: impl Into<String>) -> u64 {
        let toast_id;
        {
            let mut inner = self.lock();
            toast_id = inner.next_id;
            inner.next_id += 1;
            inner.toasts.push(Toast {
                id: toast_id,
                message: message.into(),
                expires_at: Instant::now() + TOAST_TTL,
            });
        }

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let tray = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(TOAST_TTL).await;
                tray.remove(toast_id);
            });
        }

        toast_id
    }

    /// All unexpired toasts, in insertion order.
    #[must_use]
    pub fn visible(&self) -> Vec<Toast> {
        let now = Instant::now();
        let mut inner = self.lock();
        inner.toasts.retain(|t| t.expires_at > now);
        inner.toasts.clone()
    }

    fn remove(&self, id: u64) {
        self.lock().toasts.retain(|t| t.id != id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_visible_until_ttl() {
        let tray = ToastTray::new();
        tray.push("Yuzu Matcha Cloud added to bag");

        assert_eq!(tray.visible().len(), 1);

        tokio::time::advance(Duration::from_millis(2499)).await;
        assert_eq!(tray.visible().len(), 1);

        tokio::time::advance(Duration::from_millis(2)).await;
        assert!(tray.visible().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ids_are_unique_and_ordered() {
        let tray = ToastTray::new();
        let a = tray.push("first");
        let b = tray.push("second");
        assert!(b > a);

        let visible = tray.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].message, "first");
        assert_eq!(visible[1].message, "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_lifetimes() {
        let tray = ToastTray::new();
        tray.push("early");
        tokio::time::advance(Duration::from_millis(2000)).await;
        tray.push("late");

        tokio::time::advance(Duration::from_millis(600)).await;
        let visible = tray.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "late");
    }
}
