use std::time::{Duration, Instant};

/// Monotonic clock anchored at queue creation
#[derive(Debug, Clone, Copy)]
pub struct QueueClock {
    started: Instant,
}

impl QueueClock {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }

    /// Microseconds since the clock was created
    pub fn elapsed_micros(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}

impl Default for QueueClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Absolute point in time a timed operation gives up at.
/// Waits re-arm from the deadline so spurious wakeups never extend the total wait.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Option<Instant>,
}

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        // An overflowing deadline is treated as "never"
        Self { at: Instant::now().checked_add(timeout) }
    }

    /// Time left before expiry, `None` once expired
    pub fn remaining(&self) -> Option<Duration> {
        match self.at {
            Some(at) => {
                let left = at.saturating_duration_since(Instant::now());
                (!left.is_zero()).then_some(left)
            }
            None => Some(Duration::MAX),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deadline_is_expired() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
    }

    #[test]
    fn remaining_never_exceeds_timeout() {
        let deadline = Deadline::after(Duration::from_secs(5));
        let left = deadline.remaining().unwrap();
        assert!(left <= Duration::from_secs(5));
        assert!(!deadline.is_expired());
    }

    #[test]
    fn overflowing_deadline_never_expires() {
        let deadline = Deadline::after(Duration::MAX);
        assert!(!deadline.is_expired());
    }

    #[test]
    fn clock_moves_forward() {
        let clock = QueueClock::new();
        let first = clock.elapsed_micros();
        std::thread::sleep(Duration::from_millis(2));
        assert!(clock.elapsed_micros() > first);
    }
}
