//! Serial request queue
//!
//! Each upstream gets its own queue. Requests run strictly one at a time in
//! FIFO order with a fixed pause between them; that serialization is the
//! whole rate-limiting mechanism.

use crate::shared::errors::{AppError, AppResult};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::time::sleep;
use tracing::{debug, warn};
use uuid::Uuid;

type Job = Box<dyn FnOnce() -> BoxFuture<'static, ()> + Send>;

/// One pending upstream call. The job owns the caller's result channel.
struct QueuedRequest {
    id: Uuid,
    label: String,
    job: Job,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<QueuedRequest>,
    draining: bool,
}

struct QueueInner {
    name: &'static str,
    delay: Duration,
    state: Mutex<QueueState>,
}

/// FIFO queue with a single drain loop (Idle -> Draining -> Idle)
#[derive(Clone)]
pub struct SerialRequestQueue {
    inner: Arc<QueueInner>,
}

impl SerialRequestQueue {
    pub fn new(name: &'static str, delay: Duration) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                name,
                delay,
                state: Mutex::new(QueueState::default()),
            }),
        }
    }

    /// Queue an upstream call and wait for its result.
    ///
    /// A failing call only rejects its own caller; the queue moves on.
    pub async fn enqueue<F, Fut, T>(&self, label: impl Into<String>, call: F) -> AppResult<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move || {
            Box::pin(async move {
                // Receiver may be gone if the caller was cancelled
                let _ = tx.send(call().await);
            })
        });

        let request = QueuedRequest {
            id: Uuid::new_v4(),
            label: label.into(),
            job,
        };
        debug!(
            "{} queue: enqueued {} ({})",
            self.inner.name, request.label, request.id
        );

        let start_drain = {
            let mut state = self.inner.state.lock().await;
            state.pending.push_back(request);
            // Check-and-set under the same lock as the drain loop's exit check
            !std::mem::replace(&mut state.draining, true)
        };

        if start_drain {
            tokio::spawn(Self::drain(self.inner.clone()));
        }

        rx.await.map_err(|_| {
            AppError::InternalError(format!(
                "{} queue dropped a request before completing it",
                self.inner.name
            ))
        })?
    }

    async fn drain(inner: Arc<QueueInner>) {
        debug!("{} queue: draining", inner.name);

        loop {
            let next = {
                let mut state = inner.state.lock().await;
                match state.pending.pop_front() {
                    Some(request) => request,
                    None => {
                        state.draining = false;
                        debug!("{} queue: idle", inner.name);
                        return;
                    }
                }
            };

            debug!("{} queue: running {} ({})", inner.name, next.label, next.id);
            let handle = tokio::spawn((next.job)());
            if let Err(e) = handle.await {
                // A panicking call drops its sender; its caller sees InternalError
                warn!(
                    "{} queue: request {} ({}) aborted: {}",
                    inner.name, next.label, next.id, e
                );
            }

            let more_pending = !inner.state.lock().await.pending.is_empty();
            if more_pending && !inner.delay.is_zero() {
                sleep(inner.delay).await;
            }
        }
    }

    pub async fn pending(&self) -> usize {
        self.inner.state.lock().await.pending.len()
    }

    pub async fn is_draining(&self) -> bool {
        self.inner.state.lock().await.draining
    }
}
