use std::fmt;
use tokio::sync::watch;

/// A value with change notification.
///
/// Readers either poll with [`get`](Self::get) or hold a receiver from
/// [`subscribe`](Self::subscribe). Writing never fails, with or without
/// receivers.
pub struct ReactiveCell<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + Send + Sync> ReactiveCell<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value and notify every receiver.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Notify every receiver again without touching the value.
    ///
    /// Used after a refused write so that a UI which optimistically showed
    /// the rejected value re-reads the real one.
    pub fn reannounce(&self) {
        self.tx.send_modify(|_| {});
    }

    /// A new receiver. It starts with the current value marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Number of live receivers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Send + Sync + Default> Default for ReactiveCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for ReactiveCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveCell")
            .field("value", &*self.tx.borrow())
            .finish()
    }
}
