//! One-shot readiness signalling shared between a background loader and the
//! tasks that want to know when it has finished.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("timed out after {0:?} waiting for readiness")]
    Timeout(Duration),
    #[error("readiness flag dropped before it was marked ready")]
    Closed,
}

/// Something that eventually becomes ready and never goes back.
#[async_trait]
pub trait Readiness: Send + Sync {
    fn is_ready(&self) -> bool;

    /// Flip to ready. Returns `true` only for the call that changed the state.
    fn mark_ready(&self) -> bool;

    async fn wait_ready(&self) -> Result<(), ReadinessError>;
}

#[derive(Debug, Clone)]
pub struct ReadinessFlag {
    tx: Arc<watch::Sender<bool>>,
}

impl ReadinessFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub async fn wait_ready_timeout(&self, timeout: Duration) -> Result<(), ReadinessError> {
        match tokio::time::timeout(timeout, self.wait_ready()).await {
            Ok(result) => result,
            Err(_) => Err(ReadinessError::Timeout(timeout)),
        }
    }
}

impl Default for ReadinessFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Readiness for ReadinessFlag {
    fn is_ready(&self) -> bool {
        *self.tx.borrow()
    }

    fn mark_ready(&self) -> bool {
        self.tx.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }

    async fn wait_ready(&self) -> Result<(), ReadinessError> {
        let mut rx = self.tx.subscribe();
        rx.wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| ReadinessError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn starts_unready_and_flips_once() {
        let flag = ReadinessFlag::new();
        assert!(!flag.is_ready());
        assert!(flag.mark_ready());
        assert!(!flag.mark_ready(), "second mark is a no-op");
        assert!(flag.is_ready());
    }

    #[tokio::test]
    async fn wait_returns_immediately_when_ready() {
        let flag = ReadinessFlag::new();
        flag.mark_ready();
        flag.wait_ready().await.expect("ready");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn waiters_wake_when_marked_from_another_task() {
        let flag = ReadinessFlag::new();
        let waiter = {
            let flag = flag.clone();
            tokio::spawn(async move { flag.wait_ready().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        flag.mark_ready();
        let result = waiter.await.expect("join");
        assert_matches!(result, Ok(()));
    }

    #[tokio::test]
    async fn timeout_is_reported() {
        let flag = ReadinessFlag::new();
        let result = flag.wait_ready_timeout(Duration::from_millis(5)).await;
        assert_matches!(result, Err(ReadinessError::Timeout(_)));
    }
}
