use std::collections::VecDeque;

/// core queue storage: handles only ordering and capacity bookkeeping.
/// Always accessed under the owning `BlockingQueue` lock.
#[derive(Debug)]
pub struct Queue<T> {
    items: VecDeque<T>,
    capacity: Option<usize>,
    closed: bool,
}

impl<T> Queue<T> {
    /// Create a new, empty, open queue
    pub(crate) fn new(capacity: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            capacity,
            closed: false,
        }
    }

    /// Enqueue an item. On allocation failure the item is handed back and
    /// the storage is left exactly as it was.
    pub(crate) fn enqueue(&mut self, item: T) -> Result<(), T> {
        let len_before = self.items.len();
        if self.items.try_reserve(1).is_err() {
            return Err(item);
        }
        self.items.push_back(item);
        // -- post op assertion: exactly one new item at the back
        assert_eq!(self.items.len(), len_before + 1, "Queue length should increase by 1");
        Ok(())
    }

    /// Dequeue the front item
    pub(crate) fn dequeue(&mut self) -> Option<T> {
        let len_before = self.items.len();
        let result = self.items.pop_front();
        // -- post op assertion: queue size decreases if dequeue succeeded
        match result {
            Some(_) => assert_eq!(
                self.items.len(),
                len_before - 1,
                "Queue length should decrease by 1"
            ),
            None => assert_eq!(
                self.items.len(),
                len_before,
                "Queue length unchanged when empty"
            ),
        }
        result
    }

    /// Take every queued item, front first
    pub(crate) fn drain(&mut self) -> Vec<T> {
        let drained: Vec<T> = self.items.drain(..).collect();
        assert!(self.items.is_empty(), "Queue must be empty after drain");
        drained
    }

    pub(crate) fn close(&mut self) -> bool {
        let was_open = !self.closed;
        self.closed = true;
        was_open
    }

    /// Get the current queue length
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Only a bounded queue can be full
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.items.len() >= cap)
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
