//! Thread-safe FIFO hand-off queue with blocking pop.
//!
//! Any number of producers and consumers may share one [`BlockingQueue`],
//! usually through a [`SharedQueue`]. `pop` parks the calling thread while
//! the queue is empty; `push` wakes one parked consumer after releasing the
//! lock.
//!
//! A plain `pop` waits forever if nothing is ever pushed again. Callers that
//! cannot guarantee another push should either [`close`](BlockingQueue::close)
//! the queue when producers are done, or use
//! [`pop_timeout`](BlockingQueue::pop_timeout).
//!
//! ```
//! use ConcurrentQueueMini::BlockingQueue;
//!
//! let queue = BlockingQueue::new();
//! queue.push(1).unwrap();
//! queue.push(2).unwrap();
//! assert_eq!(queue.pop(), Ok(1));
//! assert_eq!(queue.pop(), Ok(2));
//! ```

use crate::core::clock::{Deadline, QueueClock};
use crate::core::error::{
    PopError, PopTimeoutError, PushError, PushTimeoutError, TryPopError, TryPushError,
};
use crate::core::event::{EventOp, QueueEvent};
use crate::core::log::Journal;
use crate::core::queue::Queue;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Thread-safe handle shared between producers and consumers
pub type SharedQueue<T> = Arc<BlockingQueue<T>>;

#[derive(Debug)]
pub struct BlockingQueue<T> {
    name: String,
    state: Mutex<Queue<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    clock: QueueClock,
    journal: Option<Journal>,
}

impl<T> BlockingQueue<T> {
    /// Create an empty, unbounded queue without a journal
    pub fn new() -> Self {
        Self::from_parts("queue".to_string(), None, None)
    }

    /// Create an empty queue whose `push` blocks once `capacity` items are queued
    pub fn bounded(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        Self::from_parts("queue".to_string(), Some(capacity), None)
    }

    pub(crate) fn from_parts(
        name: String,
        capacity: Option<usize>,
        journal: Option<Journal>,
    ) -> Self {
        Self {
            name,
            state: Mutex::new(Queue::new(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            clock: QueueClock::new(),
            journal,
        }
    }

    /// Append `value` at the back, waiting for room if the queue is bounded and full.
    ///
    /// Fails only if the queue is closed or its storage cannot grow; the value
    /// is handed back in both cases and the queue is left unmodified.
    pub fn push(&self, value: T) -> Result<(), PushError<T>> {
        let mut queue = self.lock();
        while queue.is_full() && !queue.is_closed() {
            queue = self.wait(&self.not_full, queue);
        }
        self.enqueue_locked(queue, value)
    }

    /// Push without blocking
    pub fn try_push(&self, value: T) -> Result<(), TryPushError<T>> {
        let queue = self.lock();
        if !queue.is_closed() && queue.is_full() {
            self.record(EventOp::PushRejected, queue.len());
            return Err(TryPushError::Full(value));
        }
        self.enqueue_locked(queue, value).map_err(Into::into)
    }

    /// Push, waiting at most `timeout` for free capacity
    pub fn push_timeout(&self, value: T, timeout: Duration) -> Result<(), PushTimeoutError<T>> {
        let deadline = Deadline::after(timeout);
        let mut queue = self.lock();
        while queue.is_full() && !queue.is_closed() {
            match deadline.remaining() {
                Some(left) => queue = self.wait_timeout(&self.not_full, queue, left),
                None => {
                    self.record(EventOp::PushRejected, queue.len());
                    drop(queue);
                    debug!(queue = %self.name, ?timeout, "push timed out");
                    return Err(PushTimeoutError::Timeout(value));
                }
            }
        }
        self.enqueue_locked(queue, value).map_err(Into::into)
    }

    /// Remove and return the front item, blocking while the queue is empty.
    ///
    /// Returns `Err(PopError::Closed)` only once the queue has been closed and
    /// every item pushed before the close has been handed out.
    pub fn pop(&self) -> Result<T, PopError> {
        let mut queue = self.lock();
        loop {
            if let Some(value) = queue.dequeue() {
                return Ok(self.finish_pop(queue, value));
            }
            if queue.is_closed() {
                return Err(PopError::Closed);
            }
            // Re-checked on every wake: spurious wakeups and racing consumers
            queue = self.wait(&self.not_empty, queue);
        }
    }

    /// Pop without blocking
    pub fn try_pop(&self) -> Result<T, TryPopError> {
        let mut queue = self.lock();
        match queue.dequeue() {
            Some(value) => Ok(self.finish_pop(queue, value)),
            None if queue.is_closed() => Err(TryPopError::Closed),
            None => Err(TryPopError::Empty),
        }
    }

    /// Pop, waiting at most `timeout` for an item
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, PopTimeoutError> {
        let deadline = Deadline::after(timeout);
        let mut queue = self.lock();
        loop {
            if let Some(value) = queue.dequeue() {
                return Ok(self.finish_pop(queue, value));
            }
            if queue.is_closed() {
                return Err(PopTimeoutError::Closed);
            }
            match deadline.remaining() {
                Some(left) => queue = self.wait_timeout(&self.not_empty, queue, left),
                None => {
                    self.record(EventOp::PopTimedOut, queue.len());
                    drop(queue);
                    debug!(queue = %self.name, ?timeout, "pop timed out");
                    return Err(PopTimeoutError::Timeout);
                }
            }
        }
    }

    /// Close the queue and wake every blocked producer and consumer.
    ///
    /// Items already queued are still delivered by `pop`. Returns `true` for
    /// the call that actually closed the queue.
    pub fn close(&self) -> bool {
        let mut queue = self.lock();
        let newly_closed = queue.close();
        if newly_closed {
            self.record(EventOp::Close, queue.len());
        }
        let remaining = queue.len();
        drop(queue);

        if newly_closed {
            debug!(queue = %self.name, remaining, "queue closed");
            self.not_empty.notify_all();
            self.not_full.notify_all();
        }
        newly_closed
    }

    /// Take every queued item without blocking, front first
    pub fn drain(&self) -> Vec<T> {
        let mut queue = self.lock();
        let items = queue.drain();
        self.record(EventOp::Drain, 0);
        drop(queue);

        debug!(queue = %self.name, drained = items.len(), "queue drained");
        self.not_full.notify_all();
        items
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    /// `None` for an unbounded queue
    pub fn capacity(&self) -> Option<usize> {
        self.lock().capacity()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    /// Journal snapshot; empty when journaling is off
    pub fn events(&self) -> Vec<QueueEvent> {
        self.journal.as_ref().map(Journal::entries).unwrap_or_default()
    }

    fn enqueue_locked(
        &self,
        mut queue: MutexGuard<'_, Queue<T>>,
        value: T,
    ) -> Result<(), PushError<T>> {
        if queue.is_closed() {
            self.record(EventOp::PushRejected, queue.len());
            return Err(PushError::Closed(value));
        }
        if let Err(value) = queue.enqueue(value) {
            self.record(EventOp::PushRejected, queue.len());
            drop(queue);
            warn!(queue = %self.name, "push failed: storage could not grow");
            return Err(PushError::Alloc(value));
        }
        let len = queue.len();
        self.record(EventOp::Push, len);
        drop(queue);

        trace!(queue = %self.name, len, "push");
        self.not_empty.notify_one();
        Ok(())
    }

    fn finish_pop(&self, queue: MutexGuard<'_, Queue<T>>, value: T) -> T {
        let len = queue.len();
        let bounded = queue.capacity().is_some();
        self.record(EventOp::Pop, len);
        drop(queue);

        trace!(queue = %self.name, len, "pop");
        if bounded {
            self.not_full.notify_one();
        }
        value
    }

    /// Recorded under the queue lock so journal order matches operation order
    fn record(&self, op: EventOp, len_after: usize) {
        if let Some(journal) = &self.journal {
            journal.record(QueueEvent::new(&self.name, op, len_after, self.clock.elapsed_micros()));
        }
    }

    // Every mutation of `Queue` completes or does not start, so a guard
    // poisoned by a panicking thread still protects consistent storage.
    fn lock(&self) -> MutexGuard<'_, Queue<T>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!(queue = %self.name, "recovering poisoned queue lock");
            poisoned.into_inner()
        })
    }

    fn wait<'a>(
        &self,
        cond: &Condvar,
        guard: MutexGuard<'a, Queue<T>>,
    ) -> MutexGuard<'a, Queue<T>> {
        cond.wait(guard).unwrap_or_else(PoisonError::into_inner)
    }

    fn wait_timeout<'a>(
        &self,
        cond: &Condvar,
        guard: MutexGuard<'a, Queue<T>>,
        timeout: Duration,
    ) -> MutexGuard<'a, Queue<T>> {
        let (guard, _timed_out) = cond
            .wait_timeout(guard, timeout)
            .unwrap_or_else(PoisonError::into_inner);
        guard
    }
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
