//! View lifetimes
//!
//! [`ViewScope`] ties outstanding calls to the visible lifetime of a view:
//! once the scope is cancelled, pending calls resolve to `None` and late
//! completions are dropped instead of updating state.
//!
//! [`LoadingFlag`] is the "request in flight" indicator shown on a control.
//! It is only ever raised through a [`LoadingGuard`], so it is cleared on
//! every exit path.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Cancellation scope bound to a mounted view
#[derive(Debug, Clone)]
pub struct ViewScope {
    cancelled: Arc<watch::Sender<bool>>,
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            cancelled: Arc::new(tx),
        }
    }

    /// Mark the view unmounted; pending and future calls yield `None`
    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Drive `fut` unless the scope is cancelled first.
    ///
    /// Returns `None` when the scope was cancelled before or while the
    /// future ran, including when it finished after cancellation.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }

        let mut rx = self.cancelled.subscribe();
        let cancelled = async move {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            output = fut => {
                if self.is_cancelled() {
                    tracing::debug!("Dropping completion of cancelled view");
                    None
                } else {
                    Some(output)
                }
            }
            _ = cancelled => None,
        }
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared "in flight" flag for one control
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the returned guard is dropped
    pub fn acquire(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.clone())
    }
}

/// Clears its [`LoadingFlag`] on drop
#[derive(Debug)]
pub struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes() {
        let scope = ViewScope::new();
        assert_eq!(scope.run(async { 42 }).await, Some(42));
    }

    #[tokio::test]
    async fn test_run_after_cancel() {
        let scope = ViewScope::new();
        scope.cancel();
        assert!(scope.is_cancelled());
        assert_eq!(scope.run(async { 42 }).await, None);
    }

    #[tokio::test]
    async fn test_cancel_while_pending() {
        let scope = ViewScope::new();
        let canceller = scope.clone();

        let (result, ()) = tokio::join!(
            scope.run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                1
            }),
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                canceller.cancel();
            }
        );

        assert_eq!(result, None);
    }

    #[test]
    fn test_loading_guard_clears_on_drop() {
        let flag = LoadingFlag::new();
        assert!(!flag.is_set());

        {
            let _guard = flag.acquire();
            assert!(flag.is_set());
        }

        assert!(!flag.is_set());
    }

    #[test]
    fn test_loading_guard_clears_on_early_return() {
        fn fails(flag: &LoadingFlag) -> Result<u32, String> {
            let _guard = flag.acquire();
            let value = "boom".parse::<u32>().map_err(|e| e.to_string())?;
            Ok(value)
        }

        let flag = LoadingFlag::new();
        assert!(fails(&flag).is_err());
        assert!(!flag.is_set());
    }
}
