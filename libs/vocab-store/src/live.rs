//! Live query subscriptions.

use crate::error::Result;
use crate::repository::SqliteStore;
use crate::store::{Change, Store};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// A live, continuously-updated view of one query.
///
/// Holds the latest snapshot at all times; [`next`](Self::next) resolves
/// whenever a write changes the result set. The subscription ends when the
/// handle is dropped or [`cancel`](Self::cancel) is called.
#[derive(Debug)]
pub struct LiveQuery<T> {
    rx: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> LiveQuery<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub(crate) fn spawn<F>(
        store: Store,
        mut events: broadcast::Receiver<Change>,
        change: Change,
        query: F,
        initial: T,
    ) -> Self
    where
        F: Fn(&SqliteStore) -> Result<T> + Send + 'static,
    {
        let (tx, rx) = watch::channel(initial);
        let task = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(c) if c == change => {}
                    Ok(_) => continue,
                    // Missed notifications: refresh unconditionally.
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }

                let snapshot = match store.read(&query) {
                    Ok(snapshot) => snapshot,
                    Err(err) => {
                        tracing::warn!(%err, "live query refresh failed, keeping last snapshot");
                        continue;
                    }
                };
                tx.send_if_modified(|current| {
                    if *current != snapshot {
                        *current = snapshot;
                        true
                    } else {
                        false
                    }
                });
                if tx.is_closed() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Latest snapshot, without waiting.
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next distinct snapshot. Returns None once the
    /// subscription has been cancelled.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// End the subscription explicitly.
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
