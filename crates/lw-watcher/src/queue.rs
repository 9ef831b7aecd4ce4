//! In-order event queue between the notification thread and the consumer.
//!
//! A thin wrapper over a tokio unbounded channel. Publishing never blocks, so
//! it is safe to call from the backend's callback; consumption can be async
//! or blocking.

use tokio::sync::mpsc;
pub use tokio::sync::mpsc::error::TryRecvError;

/// The sending half of an [`EventQueue`]. Cheap to clone.
#[derive(Debug)]
pub struct Publisher<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> Publisher<T> {
    /// Enqueues `item`. Returns `false` if the consumer is gone, in which
    /// case the item is dropped.
    #[inline]
    pub fn publish(&self, item: T) -> bool {
        self.tx.send(item).is_ok()
    }

    /// Returns `true` once the consumer has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The receiving half: yields items in submission order.
///
/// # Examples
///
/// ```
/// use lw_watcher::EventQueue;
///
/// let (publisher, mut queue) = EventQueue::channel();
/// assert!(publisher.publish(1));
/// assert!(publisher.publish(2));
/// assert_eq!(queue.try_recv().ok(), Some(1));
/// assert_eq!(queue.try_recv().ok(), Some(2));
/// ```
#[derive(Debug)]
pub struct EventQueue<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> EventQueue<T> {
    /// Creates a connected publisher and queue.
    #[must_use]
    pub fn channel() -> (Publisher<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Publisher { tx }, Self { rx })
    }

    /// Waits for the next item. Returns `None` when every publisher is gone
    /// and the queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Blocking variant of [`recv`](Self::recv). Must not be called from
    /// inside an async runtime.
    pub fn blocking_recv(&mut self) -> Option<T> {
        self.rx.blocking_recv()
    }

    /// Takes the next item if one is ready.
    ///
    /// # Errors
    ///
    /// Returns [`TryRecvError::Empty`] when nothing is queued and
    /// [`TryRecvError::Disconnected`] when every publisher is gone.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        self.rx.try_recv()
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns `true` when nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Stops accepting new items. Already queued items can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_order_is_preserved() {
        let (publisher, mut queue) = EventQueue::channel();
        for i in 0..100 {
            assert!(publisher.publish(i));
        }
        assert_eq!(queue.len(), 100);
        let got: Vec<i32> = std::iter::from_fn(|| queue.try_recv().ok()).collect();
        assert_eq!(got, (0..100).collect::<Vec<_>>());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_publish_after_consumer_dropped() {
        let (publisher, queue) = EventQueue::<u8>::channel();
        drop(queue);
        assert!(publisher.is_closed());
        assert!(!publisher.publish(1));
    }

    #[test]
    fn test_try_recv_disconnected() {
        let (publisher, mut queue) = EventQueue::<u8>::channel();
        assert!(matches!(queue.try_recv(), Err(TryRecvError::Empty)));
        drop(publisher);
        assert!(matches!(queue.try_recv(), Err(TryRecvError::Disconnected)));
    }

    #[test]
    fn test_publish_from_other_threads() {
        let (publisher, mut queue) = EventQueue::channel();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let publisher = publisher.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        publisher.publish(t * 100 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("publisher thread");
        }
        drop(publisher);
        let mut count = 0;
        while queue.blocking_recv().is_some() {
            count += 1;
        }
        assert_eq!(count, 100);
    }

    #[tokio::test]
    async fn test_async_recv() {
        let (publisher, mut queue) = EventQueue::channel();
        tokio::spawn(async move {
            publisher.publish("changed");
        });
        let item = tokio::time::timeout(Duration::from_secs(2), queue.recv())
            .await
            .expect("timed out");
        assert_eq!(item, Some("changed"));
    }
}
