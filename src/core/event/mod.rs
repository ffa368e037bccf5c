use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

static EVENT_COUNTER: AtomicU64 = AtomicU64::new(1); // global counter for unique event IDs

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOp {
    Push,
    Pop,
    PushRejected,
    PopTimedOut,
    Close,
    Drain,
}

/// One observable queue operation. Never carries the queued value itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEvent {
    pub seq: u64, // unique, increasing across every queue in the process
    pub queue: String,
    pub op: EventOp,
    pub len_after: usize,
    pub at_micros: u64,
}

impl QueueEvent {
    fn next_seq() -> u64 {
        EVENT_COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    pub fn new(queue: &str, op: EventOp, len_after: usize, at_micros: u64) -> Self {
        Self {
            seq: Self::next_seq(),
            queue: queue.to_string(),
            op,
            len_after,
            at_micros,
        }
    }
}

impl Display for QueueEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QueueEvent {{ seq: {}, queue: {}, op: {:?}, len_after: {}, at_micros: {} }}",
            self.seq, self.queue, self.op, self.len_after, self.at_micros,
        )
    }
}
