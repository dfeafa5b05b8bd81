//! QueuedSpawner: holds spawned tasks until the test runs them.

use crate::runtime::Spawner;
use futures::future::BoxFuture;
use std::sync::{Mutex, PoisonError};

/// A [`Spawner`] that queues tasks instead of running them, so a test
/// decides exactly when fire-and-forget work happens.
#[derive(Default)]
pub struct QueuedSpawner {
    queue: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl QueuedSpawner {
    /// Create an empty spawner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Run queued tasks, in spawn order, until the queue is empty.
    /// Tasks spawned while draining are run too.
    pub async fn run_pending(&self) {
        loop {
            let batch: Vec<_> = {
                let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
                queue.drain(..).collect()
            };
            if batch.is_empty() {
                return;
            }
            for task in batch {
                task.await;
            }
        }
    }
}

impl Spawner for QueuedSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(task);
    }
}
