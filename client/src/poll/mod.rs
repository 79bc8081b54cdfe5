//! Fixed-interval polling for list screens.
//!
//! The mobile surface approximates live updates by refetching every few
//! seconds. [`Poller::spawn`] runs that loop on the runtime and publishes
//! each outcome through a watch channel; dropping or stopping the handle
//! tears the loop down. Each tick is an independent fetch with no backoff
//! and no jitter.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::errors::{ClientError, ClientResult};

/// Latest poll outcome: data from the last successful tick and the error
/// text of the last failed one, the `{data, error}` pair every list screen
/// keeps.
#[derive(Debug, Clone)]
pub struct PollSnapshot<T> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for PollSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

pub struct Poller<T> {
    receiver: watch::Receiver<PollSnapshot<T>>,
    handle: JoinHandle<()>,
}

impl<T: Clone + Send + Sync + 'static> Poller<T> {
    /// Starts polling `fetch` at the given interval; the first tick fires
    /// immediately. The loop ends on its own when the session expires,
    /// since every further tick would fail the same way.
    pub fn spawn<F, Fut>(interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ClientResult<T>> + Send,
    {
        let (sender, receiver) = watch::channel(PollSnapshot::default());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;

                match fetch().await {
                    Ok(data) => {
                        let _ = sender.send(PollSnapshot {
                            data: Some(data),
                            error: None,
                        });
                    }
                    Err(ClientError::SessionExpired) => {
                        warn!("session expired, stopping poll loop");
                        let _ = sender.send(PollSnapshot {
                            data: None,
                            error: Some(ClientError::SessionExpired.to_string()),
                        });
                        break;
                    }
                    Err(error) => {
                        // Keep showing the last good data; only the error
                        // text changes.
                        let data = sender.borrow().data.clone();
                        let _ = sender.send(PollSnapshot {
                            data,
                            error: Some(error.to_string()),
                        });
                    }
                }
            }
        });

        Self { receiver, handle }
    }

    /// Receiver for the latest snapshot; `changed().await` wakes once per
    /// tick.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.receiver.clone()
    }

    /// Current snapshot without waiting for the next tick.
    pub fn snapshot(&self) -> PollSnapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Tears the interval loop down.
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_poller_publishes_each_tick() {
        let counter = Arc::new(AtomicU32::new(0));
        let fetch_counter = counter.clone();

        let poller = Poller::spawn(Duration::from_secs(2), move || {
            let counter = fetch_counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        });

        let mut receiver = poller.subscribe();
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().data, Some(1));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().data, Some(2));

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_keeps_last_data_through_errors() {
        let counter = Arc::new(AtomicU32::new(0));
        let fetch_counter = counter.clone();

        let poller = Poller::spawn(Duration::from_secs(2), move || {
            let counter = fetch_counter.clone();
            async move {
                match counter.fetch_add(1, Ordering::SeqCst) {
                    0 => Ok(7),
                    _ => Err(ClientError::network("connection refused")),
                }
            }
        });

        let mut receiver = poller.subscribe();
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().data, Some(7));

        receiver.changed().await.unwrap();
        let snapshot = receiver.borrow().clone();
        assert_eq!(snapshot.data, Some(7));
        assert!(snapshot.error.unwrap().contains("connection refused"));

        poller.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_stops_on_session_expiry() {
        let poller: Poller<u32> = Poller::spawn(Duration::from_secs(2), || async {
            Err(ClientError::SessionExpired)
        });

        let mut receiver = poller.subscribe();
        receiver.changed().await.unwrap();
        assert!(receiver.borrow().error.as_deref().unwrap().contains("expired"));

        // The loop broke, so the sender is gone and no further change
        // notification can arrive.
        assert!(receiver.changed().await.is_err());
    }
}
